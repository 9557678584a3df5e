pub mod commands;
pub mod contracts;
pub mod dates;
pub mod editor;
pub mod error;
pub mod migrations;
pub mod report;
pub mod setup;
pub mod state;
pub mod store;
pub mod submit;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{LedgerError, LedgerResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
