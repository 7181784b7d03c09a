//! Storage backend kinds.

use std::fmt;
use std::str::FromStr;

use crate::persistence::PersistenceError;

/// The storage technology a deployment is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatabaseBackend {
    /// One JSON file per record.
    #[default]
    Json,
    MySql,
    Sqlite,
    MariaDb,
}

impl DatabaseBackend {
    pub const ALL: [DatabaseBackend; 4] = [Self::Json, Self::MySql, Self::Sqlite, Self::MariaDb];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
            Self::MariaDb => "mariadb",
        }
    }

    /// Whether records live in a table (and the table prefix applies).
    pub fn is_relational(self) -> bool {
        !matches!(self, Self::Json)
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseBackend {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "mysql" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            "mariadb" => Ok(Self::MariaDb),
            _ => Err(PersistenceError::UnknownBackend(s.to_string())),
        }
    }
}
