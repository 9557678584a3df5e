use std::io;

use serde_json::Value;

use super::format;

pub fn render_submit(data: &Value) -> io::Result<String> {
    let entry = data
        .get("entry")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("submit output requires entry"))?;
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Entry recorded.");

    let mut lines = vec![message.to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Entry ID:", field(entry, "entry_id")),
            ("Kind:", field(entry, "kind")),
            ("Date:", field(entry, "date")),
            ("Tag:", field(entry, "user_tag")),
            ("Time:", field(entry, "time")),
            ("Amount:", field(entry, "amount")),
        ],
        2,
    ));

    Ok(lines.join("\n"))
}

fn field(entry: &serde_json::Map<String, Value>, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}
