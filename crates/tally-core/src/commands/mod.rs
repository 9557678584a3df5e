pub mod entries;
pub mod report;
pub mod submit;

use std::path::Path;

use crate::setup::{ensure_initialized, ensure_initialized_at, SetupContext};
use crate::LedgerResult;

pub(crate) fn load_setup(home_override: Option<&Path>) -> LedgerResult<SetupContext> {
    if let Some(path) = home_override {
        return ensure_initialized_at(path);
    }
    ensure_initialized()
}
