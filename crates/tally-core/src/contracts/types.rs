//! Data payloads carried inside success envelopes. Field names here are
//! the stable JSON surface; renaming one is a breaking change.

use serde::Serialize;

use crate::report::Report;
use crate::store::LedgerEntry;

#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub entry_id: i64,
    pub kind: String,
    pub date: String,
    pub user_tag: String,
    pub time: String,
    pub amount: String,
}

impl From<&LedgerEntry> for EntryRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            entry_id: entry.id,
            kind: entry.kind.as_str().to_string(),
            date: entry.date.clone(),
            user_tag: entry.user_tag.clone(),
            time: entry.time.clone(),
            amount: entry.amount.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitData {
    pub entry: EntryRow,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryListData {
    pub date: String,
    pub count: usize,
    pub entries: Vec<EntryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    /// `"day"` or `"month"`.
    pub scope: String,
    pub report: Report,
    /// True when session overrides were applied; the stored ledger is
    /// unchanged either way.
    pub overridden: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditData {
    pub entry: EntryRow,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteData {
    pub deleted: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<NextStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextStep {
    pub label: String,
    pub command: String,
}
