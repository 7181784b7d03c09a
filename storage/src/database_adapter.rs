//! The database configuration object handed to every record adapter.

use crate::backend::DatabaseBackend;
use crate::config::DatabaseConfig;
use crate::persistence::sql::{validate_table_prefix, Database};
use crate::persistence::PersistenceError;

/// Backend kind plus, for relational kinds, the live connection and the
/// table prefix that scopes it.
#[derive(Clone)]
pub struct DatabaseAdapter {
    backend: DatabaseBackend,
    sql: Option<SqlBinding>,
}

#[derive(Clone)]
struct SqlBinding {
    database: Database,
    table_prefix: String,
}

impl DatabaseAdapter {
    /// JSON file storage; no connection, no table prefix.
    pub fn json() -> Self {
        Self {
            backend: DatabaseBackend::Json,
            sql: None,
        }
    }

    /// Relational storage on an already-open connection.
    pub fn relational(
        backend: DatabaseBackend,
        database: Database,
        table_prefix: impl Into<String>,
    ) -> Result<Self, PersistenceError> {
        if !backend.is_relational() {
            return Err(PersistenceError::NotRelational(backend));
        }
        let table_prefix = table_prefix.into();
        validate_table_prefix(&table_prefix)?;
        Ok(Self {
            backend,
            sql: Some(SqlBinding {
                database,
                table_prefix,
            }),
        })
    }

    /// Open whatever `config` describes, connecting for relational kinds.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        if !config.backend.is_relational() {
            tracing::info!(data_dir = %config.data_dir.display(), "Using JSON storage");
            return Ok(Self::json());
        }
        let url = config
            .database_url()
            .ok_or(PersistenceError::MissingDatabase(config.backend))?;
        validate_table_prefix(&config.table_prefix)?;
        let database = Database::connect(config.backend, &url).await?;
        tracing::info!(
            backend = %config.backend,
            table_prefix = %config.table_prefix,
            "Using relational storage"
        );
        Self::relational(config.backend, database, config.table_prefix.clone())
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    /// The connection, for relational backends.
    pub fn database(&self) -> Option<&Database> {
        self.sql.as_ref().map(|sql| &sql.database)
    }

    /// The table prefix, for relational backends. Always None for JSON.
    pub fn table_prefix(&self) -> Option<&str> {
        self.sql.as_ref().map(|sql| sql.table_prefix.as_str())
    }
}
