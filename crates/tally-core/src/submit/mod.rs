//! Submission pipeline: parse, normalize the clock time, deduplicate,
//! persist. The dedupe check and the insert share one immediate
//! transaction so two identical submissions racing each other cannot
//! both land.

pub mod parse;

use chrono::TimeDelta;
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;

use crate::dates::parse_clock_time;
use crate::state::map_sqlite_error;
use crate::store::{self, LedgerEntry, NewEntry};
use crate::{LedgerError, LedgerResult};

pub use parse::{parse_submission, Submission, CURRENCY_GLYPH};

/// Submitted clock times arrive in UTC and are stored shifted to the
/// ledger's local zone.
const LOCAL_OFFSET_HOURS: i64 = 3;

/// Parses `text`, shifts the time to local, and stores the entry unless an
/// identical one already exists for that date.
pub fn execute(
    connection: &mut Connection,
    db_path: &Path,
    text: &str,
    user_id: i64,
) -> LedgerResult<LedgerEntry> {
    let submission = parse_submission(text)?;
    let local_time = to_local_clock(&submission.time);

    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let existing = store::entries_for_date(&transaction, db_path, &submission.date, None)?;
    if let Some(matched) = existing.iter().find(|entry| {
        entry.kind == submission.kind
            && entry.user_tag == submission.user_tag
            && entry.time == local_time
            && entry.amount == submission.amount
    }) {
        return Err(LedgerError::duplicate_entry(
            matched.id,
            &submission.date,
            submission.kind.as_str(),
        ));
    }

    let entry_id = store::insert_entry(
        &transaction,
        db_path,
        &NewEntry {
            kind: submission.kind,
            date: submission.date.clone(),
            user_tag: submission.user_tag.clone(),
            time: local_time.clone(),
            amount: submission.amount.clone(),
            user_id,
        },
    )?;

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(LedgerEntry {
        id: entry_id,
        kind: submission.kind,
        date: submission.date,
        user_tag: submission.user_tag,
        time: local_time,
        amount: submission.amount,
        user_id,
    })
}

/// Shifts an `HH:MM` clock time forward by the local offset, wrapping past
/// midnight. A time the parser somehow cannot reread passes through
/// untouched rather than aborting the submission.
pub(crate) fn to_local_clock(time: &str) -> String {
    match parse_clock_time(time) {
        Some(parsed) => {
            let (shifted, _) = parsed.overflowing_add_signed(TimeDelta::hours(LOCAL_OFFSET_HOURS));
            shifted.format("%H:%M").to_string()
        }
        None => time.to_string(),
    }
}
