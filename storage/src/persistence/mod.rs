mod json_store;
mod record_store;
pub mod sql;
mod traits;

pub use json_store::JsonStore;
pub use record_store::{RecordStore, StoreKind};
pub use traits::{ArenaProvider, ChallengeProvider};

use crate::backend::DatabaseBackend;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Unknown database backend: {0}")]
    UnknownBackend(String),
    #[error("Invalid table prefix {0:?}: only ASCII letters, digits and '_' are allowed")]
    InvalidTablePrefix(String),
    #[error("Invalid record id {0:?}: must be a single file name")]
    InvalidRecordId(String),
    #[error("Only {decoded} of {stored} stored {kind} records could be decoded")]
    IncompleteRead {
        kind: &'static str,
        stored: usize,
        decoded: usize,
    },
    #[error("Backend {0} requires a database connection")]
    MissingDatabase(DatabaseBackend),
    #[error("Backend {0} does not use a database connection")]
    NotRelational(DatabaseBackend),
}
