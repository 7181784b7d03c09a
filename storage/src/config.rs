//! Configuration for guild storage
//!
//! Every value comes from an environment variable with a compile-time
//! fallback:
//! - `GUILDS_DATA_DIR`: data folder (JSON records, default SQLite file)
//! - `GUILDS_DB_BACKEND`: `json`, `mysql`, `sqlite` or `mariadb`
//! - `GUILDS_DB_URL`: connection URL for relational backends
//! - `GUILDS_TABLE_PREFIX`: prefix for relational table names
//! - `GUILDS_READ_ONLY`: freeze all persistence mutations
//! - `GUILDS_PRETTY_JSON`: pretty-print stored records

use std::path::PathBuf;

use crate::backend::DatabaseBackend;
use crate::persistence::PersistenceError;

const DEFAULT_CONFIG_DIR: &str = ".config/guilds/data";
const DEV_DATA_DIR: &str = "./data";
const DEFAULT_TABLE_PREFIX: &str = "guilds_";
const DEFAULT_SQLITE_FILE: &str = "guilds.db";

/// Get the data directory for persistence.
///
/// Priority:
/// 1. GUILDS_DATA_DIR env variable if set
/// 2. $HOME/.config/guilds/data if HOME is set
/// 3. ./data as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GUILDS_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// Get the configured backend kind. Defaults to JSON when unset.
pub fn get_backend() -> Result<DatabaseBackend, PersistenceError> {
    match std::env::var("GUILDS_DB_BACKEND") {
        Ok(value) => value.parse(),
        Err(_) => Ok(DatabaseBackend::default()),
    }
}

/// Get the relational connection URL, if one was configured.
pub fn get_database_url() -> Option<String> {
    std::env::var("GUILDS_DB_URL").ok().filter(|url| !url.is_empty())
}

/// Get the table prefix. Defaults to `guilds_`.
pub fn get_table_prefix() -> String {
    std::env::var("GUILDS_TABLE_PREFIX").unwrap_or_else(|_| DEFAULT_TABLE_PREFIX.to_string())
}

/// Get the read-only flag. Unset or unparseable values mean writable.
pub fn get_read_only() -> bool {
    std::env::var("GUILDS_READ_ONLY")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Whether JSON records are written pretty-printed. Defaults to compact.
pub fn get_pretty_json() -> bool {
    std::env::var("GUILDS_PRETTY_JSON")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Everything needed to open a [`crate::DatabaseAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub data_dir: PathBuf,
    pub url: Option<String>,
    pub table_prefix: String,
}

impl DatabaseConfig {
    /// JSON storage under `data_dir`.
    pub fn json(data_dir: PathBuf) -> Self {
        Self {
            backend: DatabaseBackend::Json,
            data_dir,
            url: None,
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, PersistenceError> {
        Ok(Self {
            backend: get_backend()?,
            data_dir: get_data_dir(),
            url: get_database_url(),
            table_prefix: get_table_prefix(),
        })
    }

    /// The URL to connect with. SQLite falls back to a file in the data
    /// directory; MySQL and MariaDB have no default.
    pub fn database_url(&self) -> Option<String> {
        match (&self.url, self.backend) {
            (Some(url), _) => Some(url.clone()),
            (None, DatabaseBackend::Sqlite) => Some(format!(
                "sqlite:{}",
                self.data_dir.join(DEFAULT_SQLITE_FILE).display()
            )),
            (None, _) => None,
        }
    }
}
