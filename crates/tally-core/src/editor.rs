//! Editing and deleting stored entries.
//!
//! The stateless functions at the top do the actual work and are what the
//! command layer calls. [`EditorSession`] wraps them in the step-by-step
//! flow an interactive front end walks through: pick an entry, pick a
//! field, provide a value, or confirm a delete. Storage is only touched on
//! the final step of either path, so abandoning a session mid-way leaves
//! the ledger exactly as it was.

use rusqlite::Connection;
use std::path::Path;

use crate::dates::parse_clock_time;
use crate::store::{self, EntryPatch, LedgerEntry};
use crate::submit::parse::{is_valid_user_tag, normalize_amount};
use crate::{LedgerError, LedgerResult};

/// The entry fields an edit may change. Kind and date are fixed at
/// submission time; a wrong kind or date is a delete-and-resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Amount,
    Time,
    UserTag,
}

impl EditField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Time => "time",
            Self::UserTag => "tag",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "amount" => Some(Self::Amount),
            "time" => Some(Self::Time),
            "tag" => Some(Self::UserTag),
            _ => None,
        }
    }
}

/// Validates `raw` for `field` and applies it to the stored entry.
/// Returns the entry as it reads after the update.
pub fn apply_field_edit(
    connection: &Connection,
    db_path: &Path,
    entry_id: i64,
    field: EditField,
    raw: &str,
) -> LedgerResult<LedgerEntry> {
    let mut patch = EntryPatch::default();
    match field {
        EditField::Amount => {
            let Some(amount) = normalize_amount(raw) else {
                return Err(LedgerError::edit_validation(
                    field.as_str(),
                    "expected a positive whole number of rubles.",
                    raw,
                ));
            };
            patch.amount = Some(amount);
        }
        EditField::Time => {
            if parse_clock_time(raw).is_none() {
                return Err(LedgerError::edit_validation(
                    field.as_str(),
                    "expected a 24-hour `HH:MM` time.",
                    raw,
                ));
            }
            patch.time = Some(raw.to_string());
        }
        EditField::UserTag => {
            if !is_valid_user_tag(raw) {
                return Err(LedgerError::edit_validation(
                    field.as_str(),
                    "expected `@` followed by letters, digits, or `_`.",
                    raw,
                ));
            }
            patch.user_tag = Some(raw.to_string());
        }
    }

    if !store::update_entry(connection, db_path, entry_id, &patch)? {
        return Err(LedgerError::entry_not_found(entry_id));
    }

    match store::entry_by_id(connection, db_path, entry_id)? {
        Some(entry) => Ok(entry),
        None => Err(LedgerError::entry_not_found(entry_id)),
    }
}

/// First half of a delete: fetch the entry so the caller can show what is
/// about to go. Nothing is removed yet.
pub fn request_delete(
    connection: &Connection,
    db_path: &Path,
    entry_id: i64,
) -> LedgerResult<LedgerEntry> {
    match store::entry_by_id(connection, db_path, entry_id)? {
        Some(entry) => Ok(entry),
        None => Err(LedgerError::entry_not_found(entry_id)),
    }
}

/// Second half of a delete. Errors if the entry vanished between the
/// preview and the confirmation.
pub fn confirm_delete(connection: &Connection, db_path: &Path, entry_id: i64) -> LedgerResult<()> {
    if !store::delete_entry(connection, db_path, entry_id)? {
        return Err(LedgerError::entry_not_found(entry_id));
    }
    Ok(())
}

/// What an editing session was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditIntent {
    Edit,
    Delete,
}

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    SelectingRecord {
        intent: EditIntent,
    },
    ChoosingField {
        entry_id: i64,
    },
    AwaitingFieldValue {
        entry_id: i64,
        field: EditField,
    },
    ConfirmingDelete {
        entry_id: i64,
    },
}

/// One input to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    StartEdit,
    StartDelete,
    SelectRecord(i64),
    ChooseField(EditField),
    ProvideValue(String),
    Confirm,
    Cancel,
}

/// What the caller should do next after feeding an event in.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    AwaitingSelection,
    AwaitingFieldChoice { entry: LedgerEntry },
    AwaitingValue { field: EditField },
    Updated { entry: LedgerEntry },
    DeletePreview { entry: LedgerEntry },
    Deleted { entry_id: i64 },
    Cancelled,
}

/// Drives the edit/delete flow one event at a time.
#[derive(Debug, Default)]
pub struct EditorSession {
    state: EditorState,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Advances the session. A rejected value or missing entry does not
    /// advance the state, except that a confirmed delete hitting a
    /// missing entry has nothing left to act on and falls back to idle.
    /// `Cancel` returns to idle from anywhere.
    pub fn handle(
        &mut self,
        connection: &Connection,
        db_path: &Path,
        event: EditorEvent,
    ) -> LedgerResult<EditorOutcome> {
        if event == EditorEvent::Cancel {
            self.state = EditorState::Idle;
            return Ok(EditorOutcome::Cancelled);
        }

        match (self.state, event) {
            (EditorState::Idle, EditorEvent::StartEdit) => {
                self.state = EditorState::SelectingRecord {
                    intent: EditIntent::Edit,
                };
                Ok(EditorOutcome::AwaitingSelection)
            }
            (EditorState::Idle, EditorEvent::StartDelete) => {
                self.state = EditorState::SelectingRecord {
                    intent: EditIntent::Delete,
                };
                Ok(EditorOutcome::AwaitingSelection)
            }
            (EditorState::SelectingRecord { intent }, EditorEvent::SelectRecord(entry_id)) => {
                let entry = request_delete(connection, db_path, entry_id)?;
                match intent {
                    EditIntent::Edit => {
                        self.state = EditorState::ChoosingField { entry_id };
                        Ok(EditorOutcome::AwaitingFieldChoice { entry })
                    }
                    EditIntent::Delete => {
                        self.state = EditorState::ConfirmingDelete { entry_id };
                        Ok(EditorOutcome::DeletePreview { entry })
                    }
                }
            }
            (EditorState::ChoosingField { entry_id }, EditorEvent::ChooseField(field)) => {
                self.state = EditorState::AwaitingFieldValue { entry_id, field };
                Ok(EditorOutcome::AwaitingValue { field })
            }
            (
                EditorState::AwaitingFieldValue { entry_id, field },
                EditorEvent::ProvideValue(value),
            ) => {
                let entry = apply_field_edit(connection, db_path, entry_id, field, &value)?;
                self.state = EditorState::Idle;
                Ok(EditorOutcome::Updated { entry })
            }
            (EditorState::ConfirmingDelete { entry_id }, EditorEvent::Confirm) => {
                let result = confirm_delete(connection, db_path, entry_id);
                // Either way the session is over: the entry is gone.
                self.state = EditorState::Idle;
                result?;
                Ok(EditorOutcome::Deleted { entry_id })
            }
            (_, event) => Err(LedgerError::invalid_argument(&format!(
                "`{event:?}` is not valid at this step of the editing flow."
            ))),
        }
    }
}
