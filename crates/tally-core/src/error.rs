use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const SUBMISSION_EXAMPLE: &str = "sale/10.04.25/@user/10:00/7000";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LedgerError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl LedgerError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `tally {cmd} --help` for usage."),
            None => "Run `tally --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn submission_format(received: &str) -> Self {
        Self::new(
            "submission_format",
            "Submission does not match the entry format.",
            vec![
                format!("Use five `/`-separated fields: {SUBMISSION_EXAMPLE}"),
                "Kind is `sale` or `purchase`; date is DD.MM.YY; tag starts with `@`; time is HH:MM."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "received": received,
            "example": SUBMISSION_EXAMPLE,
        }))
    }

    pub fn duplicate_entry(matched_id: i64, date: &str, kind: &str) -> Self {
        Self::new(
            "duplicate_entry",
            &format!("This {kind} for {date} is already recorded. Nothing was written."),
            vec![
                format!("Run `tally entries list {date}` to review the stored entries."),
                "Change the tag, time, or amount if this is a different transaction.".to_string(),
            ],
        )
        .with_data(json!({
            "matched_entry_id": matched_id,
        }))
    }

    pub fn edit_validation(field: &str, detail: &str, received: &str) -> Self {
        Self::new(
            "edit_validation",
            &format!("New value for `{field}` is invalid: {detail} The stored entry is unchanged."),
            vec![format!(
                "Rerun `tally entries edit <id> {field} <value>` with a corrected value."
            )],
        )
        .with_data(json!({
            "field": field,
            "received": received,
        }))
    }

    pub fn entry_not_found(entry_id: i64) -> Self {
        Self::new(
            "entry_not_found",
            &format!("Entry `{entry_id}` was not found. It may have already been deleted."),
            vec![
                "Run `tally entries list <DD.MM.YY>` to find a valid entry id.".to_string(),
            ],
        )
        .with_data(json!({
            "entry_id": entry_id,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `TALLY_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite ledger file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
