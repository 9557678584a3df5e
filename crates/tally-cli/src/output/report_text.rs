use std::io;

use serde_json::Value;

use super::format;

pub fn render_report(data: &Value) -> io::Result<String> {
    let report = data
        .get("report")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("report output requires report"))?;
    let scope = data.get("scope").and_then(Value::as_str).unwrap_or("day");
    let overridden = data
        .get("overridden")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let date = report.get("date").and_then(Value::as_str).unwrap_or("?");
    let heading = match scope {
        "month" => format!("Report for {date} (month):"),
        _ => format!("Report for {date}:"),
    };

    let mut lines = vec![heading, String::new()];

    let mut entries = vec![
        ("Sales:", figure(report, "total_sales")),
        ("Purchases:", figure(report, "total_purchases")),
        ("Admin fee:", figure(report, "admin_fee")),
        ("Card fee:", figure(report, "card_fee")),
        ("Total:", figure(report, "day_total")),
    ];
    if let Some(balance) = report.get("balance").and_then(Value::as_i64) {
        entries.push(("Balance:", balance.to_string()));
    }
    lines.extend(format::key_value_rows(&entries, 2));

    if overridden {
        lines.push(String::new());
        lines.push("Figures were overridden for this report; the stored ledger is unchanged.".to_string());
    }

    Ok(lines.join("\n"))
}

fn figure(report: &serde_json::Map<String, Value>, key: &str) -> String {
    report
        .get(key)
        .and_then(Value::as_i64)
        .map(|value| value.to_string())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_report;

    fn day_data(overridden: bool) -> serde_json::Value {
        json!({
            "scope": "day",
            "overridden": overridden,
            "report": {
                "date": "10.04.25",
                "total_sales": 7000,
                "total_purchases": 0,
                "admin_fee": 1050,
                "card_fee": 100,
                "day_total": 5850
            }
        })
    }

    #[test]
    fn renders_day_report_figures() {
        let rendered = render_report(&day_data(false));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Report for 10.04.25:"));
            assert!(text.contains("  Sales:      7000"));
            assert!(text.contains("  Total:      5850"));
            assert!(!text.contains("Balance:"));
            assert!(!text.contains("overridden"));
        }
    }

    #[test]
    fn renders_balance_when_present() {
        let mut data = day_data(false);
        data["report"]["balance"] = json!(11700);
        let rendered = render_report(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("  Balance:    11700"));
        }
    }

    #[test]
    fn notes_overridden_figures() {
        let rendered = render_report(&day_data(true));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("stored ledger is unchanged"));
        }
    }

    #[test]
    fn renders_month_heading() {
        let data = json!({
            "scope": "month",
            "overridden": false,
            "report": {
                "date": "04.25",
                "total_sales": 90000,
                "total_purchases": 10000,
                "admin_fee": 13500,
                "card_fee": 3000,
                "day_total": 63500
            }
        });
        let rendered = render_report(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Report for 04.25 (month):"));
            assert!(text.contains("  Card fee:   3000"));
        }
    }
}
