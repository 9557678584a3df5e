use std::path::{Path, PathBuf};

use crate::contracts::envelope::{success, SuccessEnvelope};
use crate::contracts::types::{DeleteData, EditData, EntryListData, EntryRow, NextStep};
use crate::dates::parse_entry_date;
use crate::editor::{self, EditField};
use crate::state::open_connection;
use crate::store::{self, EntryKind};
use crate::{LedgerError, LedgerResult};

use super::load_setup;

#[derive(Debug, Default)]
pub struct ListOptions<'a> {
    pub kind: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct EditOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct DeleteOptions<'a> {
    pub confirmed: bool,
    pub home_override: Option<&'a Path>,
}

pub fn list(date: &str, kind: Option<String>) -> LedgerResult<SuccessEnvelope> {
    list_with_options(
        date,
        ListOptions {
            kind,
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn list_with_options(date: &str, options: ListOptions<'_>) -> LedgerResult<SuccessEnvelope> {
    if parse_entry_date(date).is_none() {
        return Err(LedgerError::invalid_argument_for_command(
            &format!("Invalid date `{date}`. Expected DD.MM.YY, for example 10.04.25."),
            Some("entries list"),
        ));
    }

    let kind = match options.kind.as_deref() {
        None => None,
        Some(raw) => match EntryKind::parse(raw) {
            Some(kind) => Some(kind),
            None => {
                return Err(LedgerError::invalid_argument_for_command(
                    &format!("Invalid kind `{raw}`. Expected `sale` or `purchase`."),
                    Some("entries list"),
                ));
            }
        },
    };

    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let entries = store::entries_for_date(&connection, &db_path, date, kind)?;
    let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();

    success(
        "entries list",
        EntryListData {
            date: date.to_string(),
            count: rows.len(),
            entries: rows,
        },
    )
}

pub fn edit(entry_id: i64, field: &str, value: &str) -> LedgerResult<SuccessEnvelope> {
    edit_with_options(
        entry_id,
        field,
        value,
        EditOptions {
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn edit_with_options(
    entry_id: i64,
    field: &str,
    value: &str,
    options: EditOptions<'_>,
) -> LedgerResult<SuccessEnvelope> {
    let Some(edit_field) = EditField::parse(field) else {
        return Err(LedgerError::invalid_argument_for_command(
            &format!("Invalid field `{field}`. Expected `amount`, `time`, or `tag`."),
            Some("entries edit"),
        ));
    };

    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let entry = editor::apply_field_edit(&connection, &db_path, entry_id, edit_field, value)?;
    let message = format!(
        "Entry {} updated: {} is now {}.",
        entry.id,
        edit_field.as_str(),
        field_value(&entry, edit_field)
    );

    success(
        "entries edit",
        EditData {
            entry: EntryRow::from(&entry),
            field: edit_field.as_str().to_string(),
            message,
        },
    )
}

pub fn delete(entry_id: i64, confirmed: bool) -> LedgerResult<SuccessEnvelope> {
    delete_with_options(
        entry_id,
        DeleteOptions {
            confirmed,
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn delete_with_options(
    entry_id: i64,
    options: DeleteOptions<'_>,
) -> LedgerResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    if !options.confirmed {
        let entry = editor::request_delete(&connection, &db_path, entry_id)?;
        return success(
            "entries delete",
            DeleteData {
                deleted: false,
                message: format!(
                    "Entry {} is a {} of {} on {}. Nothing was deleted yet.",
                    entry.id,
                    entry.kind.as_str(),
                    entry.amount,
                    entry.date
                ),
                entry: Some(EntryRow::from(&entry)),
                next_step: Some(NextStep {
                    label: "Confirm the deletion".to_string(),
                    command: format!("tally entries delete {entry_id} --yes"),
                }),
            },
        );
    }

    editor::confirm_delete(&connection, &db_path, entry_id)?;
    success(
        "entries delete",
        DeleteData {
            deleted: true,
            message: format!("Entry {entry_id} deleted."),
            entry: None,
            next_step: None,
        },
    )
}

fn field_value(entry: &store::LedgerEntry, field: EditField) -> &str {
    match field {
        EditField::Amount => &entry.amount,
        EditField::Time => &entry.time,
        EditField::UserTag => &entry.user_tag,
    }
}
