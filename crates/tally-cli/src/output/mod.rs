mod entries_text;
mod error_text;
mod format;
mod json;
mod mode;
mod report_text;
mod submit_text;

use std::io;

use tally_core::{LedgerError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{mode_for_command, OutputMode};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &LedgerError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "submit" => submit_text::render_submit(&success.data),
        "report day" | "report month" => report_text::render_report(&success.data),
        "entries list" => entries_text::render_list(&success.data),
        "entries edit" => entries_text::render_edit(&success.data),
        "entries delete" => entries_text::render_delete(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
