use std::io;

use serde::Serialize;
use serde_json::json;
use tally_core::contracts::envelope::failure_from_error;
use tally_core::{LedgerError, SuccessEnvelope};

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let payload = json!({
        "ok": true,
        "version": success.version,
        "data": success.data,
    });
    serialize_json_pretty(&payload)
}

pub fn render_error_json(error: &LedgerError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
