use std::path::{Path, PathBuf};

use serde_json::Value;
use tally_core::commands::report::{self, DayOptions, MonthOptions, ReportOverrides};
use tally_core::commands::submit::{self, SubmitOptions};
use tally_core::{LedgerResult, SuccessEnvelope};
use tempfile::tempdir;

fn temp_home() -> std::io::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempdir()?;
    let home = dir.path().join("ledger-home");
    Ok((dir, home))
}

fn seed(home: &Path, submissions: &[&str]) {
    for text in submissions {
        let result = submit::run_with_options(
            text,
            SubmitOptions {
                user_id: 0,
                home_override: Some(home),
            },
        );
        assert!(result.is_ok(), "failed to seed: {text}");
    }
}

fn run_day(home: &Path, date: &str, with_balance: bool) -> LedgerResult<SuccessEnvelope> {
    report::day_with_options(
        date,
        DayOptions {
            with_balance,
            overrides: ReportOverrides::default(),
            home_override: Some(home),
        },
    )
}

fn run_month(home: &Path, period: &str) -> LedgerResult<SuccessEnvelope> {
    report::month_with_options(
        period,
        MonthOptions {
            home_override: Some(home),
        },
    )
}

fn figure(envelope: &SuccessEnvelope, key: &str) -> Option<i64> {
    envelope.data["report"].get(key).and_then(Value::as_i64)
}

#[test]
fn canonical_day_report() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };
    seed(&home, &["sale/10.04.25/@ivan/10:00/7000"]);

    let result = run_day(&home, "10.04.25", false);
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(figure(&envelope, "total_sales"), Some(7000));
        assert_eq!(figure(&envelope, "total_purchases"), Some(0));
        assert_eq!(figure(&envelope, "admin_fee"), Some(1050));
        assert_eq!(figure(&envelope, "card_fee"), Some(100));
        assert_eq!(figure(&envelope, "day_total"), Some(5850));
        assert!(envelope.data["report"].get("balance").is_none());
        assert_eq!(envelope.data["overridden"], Value::Bool(false));
    }
}

#[test]
fn purchases_reduce_the_day_total_without_fees() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };
    seed(
        &home,
        &[
            "sale/10.04.25/@ivan/10:00/7000",
            "purchase/10.04.25/@ivan/12:00/2000",
        ],
    );

    let result = run_day(&home, "10.04.25", false);
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(figure(&envelope, "total_purchases"), Some(2000));
        // 7000 - 2000 - 1050 - 100
        assert_eq!(figure(&envelope, "day_total"), Some(3850));
    }
}

#[test]
fn empty_day_settles_negative_from_the_card_fee() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };

    let result = run_day(&home, "11.04.25", false);
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(figure(&envelope, "total_sales"), Some(0));
        assert_eq!(figure(&envelope, "day_total"), Some(-100));
    }
}

#[test]
fn balance_sums_day_totals_from_the_first_of_the_month() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };
    seed(
        &home,
        &[
            "sale/01.04.25/@ivan/10:00/7000",
            "sale/02.04.25/@ivan/10:00/7000",
        ],
    );

    // Day 1 and 2 settle to 5850 each; day 3 is an empty -100 day.
    let result = run_day(&home, "03.04.25", true);
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(figure(&envelope, "day_total"), Some(-100));
        assert_eq!(figure(&envelope, "balance"), Some(11600));
    }
}

#[test]
fn monthly_card_fee_scales_with_the_month_length() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };
    seed(&home, &["sale/10.04.25/@ivan/10:00/7000"]);

    let april = run_month(&home, "04.25");
    assert!(april.is_ok());
    if let Ok(envelope) = april {
        assert_eq!(envelope.data["report"]["date"], Value::String("04.25".to_string()));
        assert_eq!(figure(&envelope, "card_fee"), Some(3000));
        // 7000 - 0 - 1050 - 3000
        assert_eq!(figure(&envelope, "day_total"), Some(2950));
    }

    // 2025 February has 28 days.
    let february = run_month(&home, "02.25");
    assert!(february.is_ok());
    if let Ok(envelope) = february {
        assert_eq!(figure(&envelope, "card_fee"), Some(2800));
    }

    // 2028 February has 29.
    let leap = run_month(&home, "02.28");
    assert!(leap.is_ok());
    if let Ok(envelope) = leap {
        assert_eq!(figure(&envelope, "card_fee"), Some(2900));
    }
}

#[test]
fn overrides_apply_to_the_report_but_never_to_storage() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };
    seed(&home, &["sale/10.04.25/@ivan/10:00/7000"]);

    let overridden = report::day_with_options(
        "10.04.25",
        DayOptions {
            with_balance: false,
            overrides: ReportOverrides {
                total_sales: Some(10_000),
                ..ReportOverrides::default()
            },
            home_override: Some(home.as_path()),
        },
    );
    assert!(overridden.is_ok());
    if let Ok(envelope) = overridden {
        assert_eq!(envelope.data["overridden"], Value::Bool(true));
        assert_eq!(figure(&envelope, "total_sales"), Some(10_000));
        // Admin fee keeps its computed value: 10000 - 0 - 1050 - 100.
        assert_eq!(figure(&envelope, "admin_fee"), Some(1050));
        assert_eq!(figure(&envelope, "day_total"), Some(8850));
    }

    // A later plain report still sees the stored figures.
    let plain = run_day(&home, "10.04.25", false);
    assert!(plain.is_ok());
    if let Ok(envelope) = plain {
        assert_eq!(envelope.data["overridden"], Value::Bool(false));
        assert_eq!(figure(&envelope, "total_sales"), Some(7000));
        assert_eq!(figure(&envelope, "day_total"), Some(5850));
    }
}

#[test]
fn negative_override_is_rejected() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };

    let result = report::day_with_options(
        "10.04.25",
        DayOptions {
            with_balance: false,
            overrides: ReportOverrides {
                card_fee: Some(-5),
                ..ReportOverrides::default()
            },
            home_override: Some(home.as_path()),
        },
    );
    assert!(result.is_err());
    if let Err(error) = result {
        assert_eq!(error.code, "invalid_argument");
    }
}

#[test]
fn invalid_period_arguments_are_rejected() {
    let home = temp_home();
    assert!(home.is_ok());
    let Ok((_guard, home)) = home else {
        return;
    };

    let bad_day = run_day(&home, "2025-04-10", false);
    assert!(bad_day.is_err());
    if let Err(error) = bad_day {
        assert_eq!(error.code, "invalid_argument");
    }

    let bad_month = run_month(&home, "13.25");
    assert!(bad_month.is_err());
    if let Err(error) = bad_month {
        assert_eq!(error.code, "invalid_argument");
    }
}
