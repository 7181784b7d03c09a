//! Arena persistence façade.

use std::collections::HashSet;
use std::sync::Arc;

use guilds_model::Arena;

use crate::codec::{JsonCodec, RecordCodec, Storable};
use crate::database_adapter::DatabaseAdapter;
use crate::guild_storage::StorageContext;
use crate::persistence::{ArenaProvider, PersistenceError, RecordStore};
use crate::settings::SettingsSource;

/// Directory under the data folder for JSON arena files.
pub const ARENA_DIR: &str = "arenas";
/// Base table name for relational backends, before the prefix.
pub const ARENA_TABLE: &str = "arenas";

/// CRUD access to stored arenas.
///
/// Every mutating call is a silent no-op while the read-only flag is set.
pub struct ArenaAdapter<P = RecordStore, C = JsonCodec> {
    provider: P,
    table_prefix: Option<String>,
    settings: Arc<dyn SettingsSource>,
    codec: C,
}

impl ArenaAdapter {
    /// Bind to the provider matching `db`'s backend.
    pub fn new(ctx: &StorageContext, db: &DatabaseAdapter) -> Result<Self, PersistenceError> {
        let provider = RecordStore::select(db, ctx.data_folder().join(ARENA_DIR), ARENA_TABLE)?;
        Ok(Self::with_provider(
            provider,
            db.table_prefix().map(str::to_owned),
            ctx.settings(),
            ctx.codec(),
        ))
    }
}

impl<P: ArenaProvider, C: RecordCodec> ArenaAdapter<P, C> {
    pub fn with_provider(
        provider: P,
        table_prefix: Option<String>,
        settings: Arc<dyn SettingsSource>,
        codec: C,
    ) -> Self {
        Self {
            provider,
            table_prefix,
            settings,
            codec,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn table_prefix(&self) -> Option<&str> {
        self.table_prefix.as_deref()
    }

    fn read_only(&self) -> bool {
        let read_only = self.settings.read_only();
        if read_only {
            tracing::trace!("Read-only mode, skipping arena write");
        }
        read_only
    }

    pub async fn create_container(&self) -> Result<(), PersistenceError> {
        self.provider.create_container(self.table_prefix()).await
    }

    pub async fn arena_exists(&self, id: &str) -> Result<bool, PersistenceError> {
        self.provider.arena_exists(self.table_prefix(), id).await
    }

    pub async fn get_all_arena_ids(&self) -> Result<Vec<String>, PersistenceError> {
        self.provider.get_all_arena_ids(self.table_prefix()).await
    }

    /// Every stored arena. Records that fail to decode are logged and skipped.
    pub async fn get_all_arenas(&self) -> Result<Vec<Arena>, PersistenceError> {
        let blobs = self.provider.get_all_arenas(self.table_prefix()).await?;
        let mut arenas = Vec::with_capacity(blobs.len());
        for data in blobs {
            match self.codec.decode::<Arena>(&data) {
                Ok(arena) => arenas.push(arena),
                Err(e) => tracing::warn!("Skipping undecodable arena: {}", e),
            }
        }
        Ok(arenas)
    }

    pub async fn get_arena(&self, id: &str) -> Result<Option<Arena>, PersistenceError> {
        match self.provider.get_arena(self.table_prefix(), id).await? {
            Some(data) => Ok(Some(self.codec.decode(&data)?)),
            None => Ok(None),
        }
    }

    /// Make the store hold exactly `arenas`: upsert each one, then delete
    /// every stored id that was not in the collection.
    pub async fn save_arenas<'a, I>(&self, arenas: I) -> Result<(), PersistenceError>
    where
        I: IntoIterator<Item = &'a Arena>,
    {
        if self.read_only() {
            return Ok(());
        }
        let mut saved_ids = HashSet::new();
        for arena in arenas {
            self.save_arena(arena).await?;
            saved_ids.insert(arena.record_id());
        }

        let mut pruned = 0usize;
        for id in self.get_all_arena_ids().await? {
            if !saved_ids.contains(&id) {
                self.delete_arena(&id).await?;
                pruned += 1;
            }
        }
        if pruned > 0 {
            tracing::info!(pruned, kept = saved_ids.len(), "Pruned stale arenas");
        }
        Ok(())
    }

    /// Create the arena if its id is not stored yet, otherwise update it.
    pub async fn save_arena(&self, arena: &Arena) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        if self.arena_exists(&arena.record_id()).await? {
            self.update_arena(arena).await
        } else {
            self.create_arena(arena).await
        }
    }

    pub async fn create_arena(&self, arena: &Arena) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        let id = arena.record_id();
        let data = self.codec.encode(arena)?;
        tracing::debug!(%id, name = %arena.name, "Creating arena");
        self.provider.create_arena(self.table_prefix(), &id, &data).await
    }

    pub async fn update_arena(&self, arena: &Arena) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        let id = arena.record_id();
        let data = self.codec.encode(arena)?;
        tracing::debug!(%id, name = %arena.name, "Updating arena");
        self.provider.update_arena(self.table_prefix(), &id, &data).await
    }

    pub async fn delete_arena(&self, id: &str) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        tracing::debug!(%id, "Deleting arena");
        self.provider.delete_arena(self.table_prefix(), id).await
    }
}
