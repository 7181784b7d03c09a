//! Relational connection pool shared by the SQL stores.

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use std::path::PathBuf;

use crate::backend::DatabaseBackend;
use crate::persistence::PersistenceError;

/// Holds a connection pool to a SQLite, MySQL or MariaDB database.
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
    backend: DatabaseBackend,
}

impl Database {
    /// Connect to `url` with the driver for `backend`.
    ///
    /// SQLite databases are created if missing (along with their parent
    /// directory) and switched to WAL mode. In-memory SQLite gets a single
    /// pooled connection. `mariadb://` URLs go through the MySQL driver.
    pub async fn connect(backend: DatabaseBackend, url: &str) -> Result<Self, PersistenceError> {
        if !backend.is_relational() {
            return Err(PersistenceError::NotRelational(backend));
        }
        install_default_drivers();

        let url = connection_url(backend, url);
        if let Some(parent) = sqlite_file(&url).as_deref().and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let in_memory = backend == DatabaseBackend::Sqlite && sqlite_file(&url).is_none();
        let options = if in_memory {
            // One long-lived connection: every new connection to `:memory:` is a
            // fresh, empty database.
            AnyPoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            AnyPoolOptions::new().max_connections(5)
        };
        let pool = options.connect(&url).await?;

        if backend == DatabaseBackend::Sqlite && !in_memory {
            sqlx::query("PRAGMA journal_mode = WAL")
                .execute(&pool)
                .await?;
        }

        tracing::debug!(%backend, "Connected to database");
        Ok(Self { pool, backend })
    }

    /// Create an in-memory SQLite database for testing.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::connect(DatabaseBackend::Sqlite, "sqlite::memory:").await
    }

    /// The backend the pool was opened for.
    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

fn connection_url(backend: DatabaseBackend, url: &str) -> String {
    match backend {
        DatabaseBackend::MariaDb => match url.strip_prefix("mariadb://") {
            Some(rest) => format!("mysql://{rest}"),
            None => url.to_string(),
        },
        DatabaseBackend::Sqlite => {
            let url = if url.starts_with("sqlite:") {
                url.to_string()
            } else {
                format!("sqlite:{url}")
            };
            if sqlite_file(&url).is_some() && !url.contains('?') {
                format!("{url}?mode=rwc")
            } else {
                url
            }
        }
        DatabaseBackend::MySql | DatabaseBackend::Json => url.to_string(),
    }
}

/// The file behind a SQLite URL, or None for in-memory databases.
fn sqlite_file(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}
