use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_list(data: &Value) -> io::Result<String> {
    let date = data.get("date").and_then(Value::as_str).unwrap_or("?");
    let entries = data
        .get("entries")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("entries list output requires entries"))?;

    if entries.is_empty() {
        return Ok([
            format!("No entries stored for {date}."),
            String::new(),
            "Record one:".to_string(),
            format!("  tally submit \"sale/{date}/@tag/10:00/7000\""),
        ]
        .join("\n"));
    }

    let count_label = if entries.len() == 1 {
        format!("1 entry for {date}.")
    } else {
        format!("{} entries for {date}.", entries.len())
    };

    let columns = [
        Column {
            name: "ID",
            align: Align::Right,
        },
        Column {
            name: "Kind",
            align: Align::Left,
        },
        Column {
            name: "Time",
            align: Align::Left,
        },
        Column {
            name: "Tag",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
    ];

    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                text_or_number(entry, "entry_id"),
                text_or_number(entry, "kind"),
                text_or_number(entry, "time"),
                text_or_number(entry, "user_tag"),
                text_or_number(entry, "amount"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![count_label, String::new()];
    lines.extend(format::render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_edit(data: &Value) -> io::Result<String> {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("entries edit output requires message"))?;
    let entry = data
        .get("entry")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("entries edit output requires entry"))?;

    let mut lines = vec![message.to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Kind:", map_field(entry, "kind")),
            ("Date:", map_field(entry, "date")),
            ("Tag:", map_field(entry, "user_tag")),
            ("Time:", map_field(entry, "time")),
            ("Amount:", map_field(entry, "amount")),
        ],
        2,
    ));

    Ok(lines.join("\n"))
}

pub fn render_delete(data: &Value) -> io::Result<String> {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("entries delete output requires message"))?;

    let mut lines = vec![message.to_string()];

    if let Some(next_step) = data.get("next_step").and_then(Value::as_object) {
        let label = next_step.get("label").and_then(Value::as_str).unwrap_or("");
        let command = next_step
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or("");
        lines.push(String::new());
        lines.push(format!("{label}:"));
        lines.push(format!("  {command}"));
    }

    Ok(lines.join("\n"))
}

fn text_or_number(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn map_field(entry: &serde_json::Map<String, Value>, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}
