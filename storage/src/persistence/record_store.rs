//! Backend selection: one closed set of providers behind the provider traits.

use std::path::PathBuf;

use super::sql::SqlStore;
use super::traits::{ArenaProvider, ChallengeProvider};
use super::{JsonStore, PersistenceError};
use crate::backend::DatabaseBackend;
use crate::database_adapter::DatabaseAdapter;

/// Which provider family a [`RecordStore`] dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Json,
    Sql,
}

/// The provider an adapter is bound to, chosen once from the backend kind.
#[derive(Clone)]
pub enum RecordStore {
    Json(JsonStore),
    Sql(SqlStore),
}

impl RecordStore {
    /// Pick the provider for `db`'s backend.
    ///
    /// JSON records go to `json_dir`; relational records go to the `table`
    /// table on the adapter's connection.
    pub fn select(
        db: &DatabaseAdapter,
        json_dir: PathBuf,
        table: &'static str,
    ) -> Result<Self, PersistenceError> {
        match db.backend() {
            DatabaseBackend::Json => Ok(Self::Json(JsonStore::new(json_dir))),
            backend @ (DatabaseBackend::MySql | DatabaseBackend::Sqlite | DatabaseBackend::MariaDb) => {
                let database = db
                    .database()
                    .ok_or(PersistenceError::MissingDatabase(backend))?;
                Ok(Self::Sql(SqlStore::new(database.clone(), table)))
            }
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Json(_) => StoreKind::Json,
            Self::Sql(_) => StoreKind::Sql,
        }
    }

    async fn ensure_container(&self, table_prefix: Option<&str>) -> Result<(), PersistenceError> {
        match self {
            Self::Json(store) => store.ensure_dir(),
            Self::Sql(store) => store.create_table(table_prefix).await,
        }
    }

    async fn exists(&self, table_prefix: Option<&str>, id: &str) -> Result<bool, PersistenceError> {
        match self {
            Self::Json(store) => store.exists(id),
            Self::Sql(store) => store.exists(table_prefix, id).await,
        }
    }

    async fn ids(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        match self {
            Self::Json(store) => store.ids(),
            Self::Sql(store) => store.ids(table_prefix).await,
        }
    }

    async fn load_all(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        match self {
            Self::Json(store) => store.load_all(),
            Self::Sql(store) => store.load_all(table_prefix).await,
        }
    }

    async fn load(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<Option<String>, PersistenceError> {
        match self {
            Self::Json(store) => store.load(id),
            Self::Sql(store) => store.load(table_prefix, id).await,
        }
    }

    async fn create(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        match self {
            Self::Json(store) => store.write(id, data),
            Self::Sql(store) => store.insert(table_prefix, id, data).await,
        }
    }

    async fn update(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        match self {
            Self::Json(store) => store.write(id, data),
            Self::Sql(store) => store.update(table_prefix, id, data).await,
        }
    }

    async fn delete(&self, table_prefix: Option<&str>, id: &str) -> Result<(), PersistenceError> {
        match self {
            Self::Json(store) => store.delete(id),
            Self::Sql(store) => store.delete(table_prefix, id).await,
        }
    }
}

impl ArenaProvider for RecordStore {
    async fn create_container(&self, table_prefix: Option<&str>) -> Result<(), PersistenceError> {
        self.ensure_container(table_prefix).await
    }

    async fn arena_exists(&self, table_prefix: Option<&str>, id: &str) -> Result<bool, PersistenceError> {
        self.exists(table_prefix, id).await
    }

    async fn get_all_arena_ids(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        self.ids(table_prefix).await
    }

    async fn get_all_arenas(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        self.load_all(table_prefix).await
    }

    async fn get_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<Option<String>, PersistenceError> {
        self.load(table_prefix, id).await
    }

    async fn create_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.create(table_prefix, id, data).await
    }

    async fn update_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.update(table_prefix, id, data).await
    }

    async fn delete_arena(&self, table_prefix: Option<&str>, id: &str) -> Result<(), PersistenceError> {
        self.delete(table_prefix, id).await
    }
}

impl ChallengeProvider for RecordStore {
    async fn create_container(&self, table_prefix: Option<&str>) -> Result<(), PersistenceError> {
        self.ensure_container(table_prefix).await
    }

    async fn challenge_exists(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<bool, PersistenceError> {
        self.exists(table_prefix, id).await
    }

    async fn get_all_challenge_ids(
        &self,
        table_prefix: Option<&str>,
    ) -> Result<Vec<String>, PersistenceError> {
        self.ids(table_prefix).await
    }

    async fn get_all_challenges(
        &self,
        table_prefix: Option<&str>,
    ) -> Result<Vec<String>, PersistenceError> {
        self.load_all(table_prefix).await
    }

    async fn get_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<Option<String>, PersistenceError> {
        self.load(table_prefix, id).await
    }

    async fn create_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.create(table_prefix, id, data).await
    }

    async fn update_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.update(table_prefix, id, data).await
    }

    async fn delete_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<(), PersistenceError> {
        self.delete(table_prefix, id).await
    }
}
