//! Relational providers over an sqlx `AnyPool`.
//!
//! [`Database`] owns the pool for SQLite, MySQL or MariaDB. [`SqlStore`]
//! keeps one record type in one table, `<prefix><base>`, with an `id`
//! primary key and a `data` text column holding the serialized record.
//! Statements stick to the SQL subset shared by SQLite and MySQL so the
//! same store serves every relational backend.

mod database;
mod sql_store;

pub use database::Database;
pub use sql_store::SqlStore;

use super::PersistenceError;

/// Reject prefixes that cannot be spliced into a table name verbatim.
pub fn validate_table_prefix(prefix: &str) -> Result<(), PersistenceError> {
    if prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(PersistenceError::InvalidTablePrefix(prefix.to_string()))
    }
}
