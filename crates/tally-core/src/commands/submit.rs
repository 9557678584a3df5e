use std::path::{Path, PathBuf};

use crate::contracts::envelope::{success, SuccessEnvelope};
use crate::contracts::types::{EntryRow, SubmitData};
use crate::state::open_connection;
use crate::{submit, LedgerResult};

use super::load_setup;

#[derive(Debug, Default)]
pub struct SubmitOptions<'a> {
    pub user_id: i64,
    pub home_override: Option<&'a Path>,
}

pub fn run(text: &str, user_id: i64) -> LedgerResult<SuccessEnvelope> {
    run_with_options(
        text,
        SubmitOptions {
            user_id,
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn run_with_options(text: &str, options: SubmitOptions<'_>) -> LedgerResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let mut connection = open_connection(&db_path)?;

    let entry = submit::execute(&mut connection, &db_path, text, options.user_id)?;
    let message = format!(
        "Recorded {} of {} for {} at {}.",
        entry.kind.as_str(),
        entry.amount,
        entry.date,
        entry.time
    );

    success(
        "submit",
        SubmitData {
            entry: EntryRow::from(&entry),
            message,
        },
    )
}
