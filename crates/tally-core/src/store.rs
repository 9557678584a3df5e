use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use crate::dates::parse_entry_date;
use crate::state::map_sqlite_error;
use crate::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Sale,
    Purchase,
}

impl EntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
        }
    }

    /// Case-insensitive; the stored form is always the lowercase canonical
    /// word.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("sale") {
            return Some(Self::Sale);
        }
        if value.eq_ignore_ascii_case("purchase") {
            return Some(Self::Purchase);
        }
        None
    }
}

/// One recorded transaction. `id` and `user_id` are immutable; everything
/// else is mutated only through [`update_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: i64,
    pub kind: EntryKind,
    pub date: String,
    pub user_tag: String,
    pub time: String,
    pub amount: String,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewEntry {
    pub kind: EntryKind,
    pub date: String,
    pub user_tag: String,
    pub time: String,
    pub amount: String,
    pub user_id: i64,
}

/// Partial update for one entry. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub kind: Option<EntryKind>,
    pub date: Option<String>,
    pub user_tag: Option<String>,
    pub time: Option<String>,
    pub amount: Option<String>,
}

pub fn insert_entry(
    connection: &Connection,
    db_path: &Path,
    entry: &NewEntry,
) -> LedgerResult<i64> {
    connection
        .execute(
            "INSERT INTO ledger_entries (
                kind,
                entry_date,
                user_tag,
                entry_time,
                amount,
                user_id,
                created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.kind.as_str(),
                &entry.date,
                &entry.user_tag,
                &entry.time,
                &entry.amount,
                entry.user_id,
                &now_timestamp(),
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(connection.last_insert_rowid())
}

/// All entries for one date, optionally narrowed to one kind, ordered by
/// time ascending (id breaks ties so the order is stable).
pub fn entries_for_date(
    connection: &Connection,
    db_path: &Path,
    date: &str,
    kind: Option<EntryKind>,
) -> LedgerResult<Vec<LedgerEntry>> {
    let sql = match kind {
        Some(_) => {
            "SELECT entry_id, kind, entry_date, user_tag, entry_time, amount, user_id
             FROM ledger_entries
             WHERE entry_date = ?1 AND kind = ?2
             ORDER BY entry_time ASC, entry_id ASC"
        }
        None => {
            "SELECT entry_id, kind, entry_date, user_tag, entry_time, amount, user_id
             FROM ledger_entries
             WHERE entry_date = ?1
             ORDER BY entry_time ASC, entry_id ASC"
        }
    };

    let mut statement = connection
        .prepare(sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows = match kind {
        Some(kind) => statement.query_map(params![date, kind.as_str()], entry_from_row),
        None => statement.query_map(params![date], entry_from_row),
    }
    .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    Ok(entries)
}

pub fn entry_by_id(
    connection: &Connection,
    db_path: &Path,
    entry_id: i64,
) -> LedgerResult<Option<LedgerEntry>> {
    connection
        .query_row(
            "SELECT entry_id, kind, entry_date, user_tag, entry_time, amount, user_id
             FROM ledger_entries
             WHERE entry_id = ?1
             LIMIT 1",
            params![entry_id],
            entry_from_row,
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))
}

/// Applies the non-`None` fields of `patch` in one statement. Returns
/// `false` when no row with that id exists. An all-`None` patch degenerates
/// to an existence check.
pub fn update_entry(
    connection: &Connection,
    db_path: &Path,
    entry_id: i64,
    patch: &EntryPatch,
) -> LedgerResult<bool> {
    let mut assignments: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(kind) = patch.kind {
        assignments.push("kind = ?");
        values.push(Box::new(kind.as_str().to_string()));
    }
    if let Some(date) = &patch.date {
        assignments.push("entry_date = ?");
        values.push(Box::new(date.clone()));
    }
    if let Some(user_tag) = &patch.user_tag {
        assignments.push("user_tag = ?");
        values.push(Box::new(user_tag.clone()));
    }
    if let Some(time) = &patch.time {
        assignments.push("entry_time = ?");
        values.push(Box::new(time.clone()));
    }
    if let Some(amount) = &patch.amount {
        assignments.push("amount = ?");
        values.push(Box::new(amount.clone()));
    }

    if assignments.is_empty() {
        return Ok(entry_by_id(connection, db_path, entry_id)?.is_some());
    }

    let sql = format!(
        "UPDATE ledger_entries SET {} WHERE entry_id = ?",
        assignments.join(", ")
    );
    values.push(Box::new(entry_id));

    let changed = connection
        .execute(&sql, params_from_iter(&values))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(changed > 0)
}

pub fn delete_entry(connection: &Connection, db_path: &Path, entry_id: i64) -> LedgerResult<bool> {
    let deleted = connection
        .execute(
            "DELETE FROM ledger_entries WHERE entry_id = ?1",
            params![entry_id],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(deleted > 0)
}

/// Sum of parsed amounts of one kind over an inclusive date range.
///
/// The wire date format (`DD.MM.YY`) does not sort lexicographically, so
/// range membership is decided on parsed dates in Rust rather than in SQL.
/// Entries whose amount or date fails to parse contribute nothing; bad data
/// is excluded, never fatal.
pub fn sum_amount(
    connection: &Connection,
    db_path: &Path,
    kind: EntryKind,
    start: NaiveDate,
    end: NaiveDate,
) -> LedgerResult<f64> {
    let mut statement = connection
        .prepare(
            "SELECT entry_date, amount
             FROM ledger_entries
             WHERE kind = ?1",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows = statement
        .query_map(params![kind.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut total = 0.0_f64;
    for row in rows {
        let (date_text, amount_text) = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        let Some(date) = parse_entry_date(&date_text) else {
            continue;
        };
        if date < start || date > end {
            continue;
        }
        if let Ok(amount) = amount_text.parse::<f64>() {
            total += amount;
        }
    }

    Ok(total)
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<LedgerEntry> {
    let kind_text = row.get::<_, String>(1)?;
    let kind = EntryKind::parse(&kind_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(LedgerError::new(
                "ledger_corrupt",
                &format!("unknown entry kind `{kind_text}`"),
                Vec::new(),
            )),
        )
    })?;

    Ok(LedgerEntry {
        id: row.get(0)?,
        kind,
        date: row.get(2)?,
        user_tag: row.get(3)?,
        time: row.get(4)?,
        amount: row.get(5)?,
        user_id: row.get(6)?,
    })
}

pub(crate) fn now_timestamp() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH);
    match now {
        Ok(duration) => format!("{}", duration.as_secs()),
        Err(_) => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDate;
    use rusqlite::Connection;

    use super::{
        entry_by_id, insert_entry, sum_amount, update_entry, EntryKind, EntryPatch, NewEntry,
    };
    use crate::migrations;

    fn fresh_connection() -> Connection {
        let connection = Connection::open_in_memory();
        assert!(connection.is_ok());
        let Ok(mut connection) = connection else {
            unreachable!();
        };
        assert!(migrations::run_pending(&mut connection).is_ok());
        connection
    }

    fn sale_row(date: &str, amount: &str) -> NewEntry {
        NewEntry {
            kind: EntryKind::Sale,
            date: date.to_string(),
            user_tag: "@user".to_string(),
            time: "13:00".to_string(),
            amount: amount.to_string(),
            user_id: 0,
        }
    }

    fn april(day: u32) -> NaiveDate {
        let date = NaiveDate::from_ymd_opt(2025, 4, day);
        assert!(date.is_some());
        let Some(date) = date else {
            unreachable!();
        };
        date
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!(EntryKind::parse("sale"), Some(EntryKind::Sale));
        assert_eq!(EntryKind::parse("SALE"), Some(EntryKind::Sale));
        assert_eq!(EntryKind::parse("Purchase"), Some(EntryKind::Purchase));
        assert_eq!(EntryKind::parse("refund"), None);
        assert_eq!(EntryKind::parse(""), None);
    }

    #[test]
    fn kind_canonical_form_is_lowercase() {
        assert_eq!(EntryKind::Sale.as_str(), "sale");
        assert_eq!(EntryKind::Purchase.as_str(), "purchase");
    }

    #[test]
    fn sum_skips_rows_whose_amount_or_date_does_not_parse() {
        let connection = fresh_connection();
        let db_path = Path::new(":memory:");

        // Rows go in raw, below the normalizing submit layer.
        for entry in [
            sale_row("10.04.25", "7000"),
            sale_row("10.04.25", "seven thousand"),
            sale_row("2025-04-10", "500"),
        ] {
            assert!(insert_entry(&connection, db_path, &entry).is_ok());
        }

        let total = sum_amount(&connection, db_path, EntryKind::Sale, april(1), april(30));
        assert!(total.is_ok());
        if let Ok(total) = total {
            assert!((total - 7000.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn patch_can_move_an_entry_to_another_kind_and_date() {
        let connection = fresh_connection();
        let db_path = Path::new(":memory:");

        let inserted = insert_entry(&connection, db_path, &sale_row("10.04.25", "7000"));
        assert!(inserted.is_ok());
        let entry_id = inserted.unwrap_or_default();

        let patch = EntryPatch {
            kind: Some(EntryKind::Purchase),
            date: Some("11.04.25".to_string()),
            ..EntryPatch::default()
        };
        assert!(matches!(
            update_entry(&connection, db_path, entry_id, &patch),
            Ok(true)
        ));

        let fetched = entry_by_id(&connection, db_path, entry_id);
        assert!(matches!(fetched, Ok(Some(_))));
        if let Ok(Some(entry)) = fetched {
            assert_eq!(entry.kind, EntryKind::Purchase);
            assert_eq!(entry.date, "11.04.25");
            assert_eq!(entry.amount, "7000");
            assert_eq!(entry.time, "13:00");
        }
    }

    #[test]
    fn empty_patch_degenerates_to_an_existence_check() {
        let connection = fresh_connection();
        let db_path = Path::new(":memory:");

        let inserted = insert_entry(&connection, db_path, &sale_row("10.04.25", "7000"));
        assert!(inserted.is_ok());
        let entry_id = inserted.unwrap_or_default();

        let present = update_entry(&connection, db_path, entry_id, &EntryPatch::default());
        assert!(matches!(present, Ok(true)));

        let missing = update_entry(&connection, db_path, entry_id + 1, &EntryPatch::default());
        assert!(matches!(missing, Ok(false)));
    }
}
