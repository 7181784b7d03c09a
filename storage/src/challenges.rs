//! Guild challenge persistence façade.

use std::collections::HashSet;
use std::sync::Arc;

use guilds_model::GuildChallenge;

use crate::codec::{JsonCodec, RecordCodec, Storable};
use crate::database_adapter::DatabaseAdapter;
use crate::guild_storage::StorageContext;
use crate::persistence::{ChallengeProvider, PersistenceError, RecordStore};
use crate::settings::SettingsSource;

pub const CHALLENGE_DIR: &str = "challenges";
pub const CHALLENGE_TABLE: &str = "challenges";

/// CRUD access to stored guild challenges.
///
/// Unlike [`crate::ArenaAdapter::save_arenas`], bulk saves never delete
/// challenges missing from the input.
pub struct ChallengeAdapter<P = RecordStore, C = JsonCodec> {
    provider: P,
    table_prefix: Option<String>,
    settings: Arc<dyn SettingsSource>,
    codec: C,
}

impl ChallengeAdapter {
    pub fn new(ctx: &StorageContext, db: &DatabaseAdapter) -> Result<Self, PersistenceError> {
        let provider = RecordStore::select(
            db,
            ctx.data_folder().join(CHALLENGE_DIR),
            CHALLENGE_TABLE,
        )?;
        Ok(Self::with_provider(
            provider,
            db.table_prefix().map(str::to_owned),
            ctx.settings(),
            ctx.codec(),
        ))
    }
}

impl<P: ChallengeProvider, C: RecordCodec> ChallengeAdapter<P, C> {
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
            tracing::trace!("Read-only mode, skipping challenge write");
        }
        read_only
    }

    pub async fn create_container(&self) -> Result<(), PersistenceError> {
        self.provider.create_container(self.table_prefix()).await
    }

    pub async fn challenge_exists(&self, id: &str) -> Result<bool, PersistenceError> {
        self.provider.challenge_exists(self.table_prefix(), id).await
    }

    pub async fn get_all_challenge_ids(&self) -> Result<Vec<String>, PersistenceError> {
        self.provider.get_all_challenge_ids(self.table_prefix()).await
    }

    /// Every stored challenge. Records that fail to decode are logged and skipped.
    pub async fn get_all_challenges(&self) -> Result<HashSet<GuildChallenge>, PersistenceError> {
        let blobs = self.provider.get_all_challenges(self.table_prefix()).await?;
        let mut challenges = HashSet::with_capacity(blobs.len());
        for data in blobs {
            match self.codec.decode::<GuildChallenge>(&data) {
                Ok(challenge) => {
                    challenges.insert(challenge);
                }
                Err(e) => tracing::warn!("Skipping undecodable challenge: {}", e),
            }
        }
        Ok(challenges)
    }

    /// Look up one challenge. A missing id is `Ok(None)`, never an error.
    pub async fn get_challenge(&self, id: &str) -> Result<Option<GuildChallenge>, PersistenceError> {
        match self.provider.get_challenge(self.table_prefix(), id).await? {
            Some(data) => Ok(Some(self.codec.decode(&data)?)),
            None => Ok(None),
        }
    }

    /// Upsert each challenge. Stored challenges absent from the input stay.
    pub async fn save_challenges<'a, I>(&self, challenges: I) -> Result<(), PersistenceError>
    where
        I: IntoIterator<Item = &'a GuildChallenge>,
    {
        if self.read_only() {
            return Ok(());
        }
        for challenge in challenges {
            self.save_challenge(challenge).await?;
        }
        Ok(())
    }

    pub async fn save_challenge(&self, challenge: &GuildChallenge) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        if self.challenge_exists(&challenge.record_id()).await? {
            self.update_challenge(challenge).await
        } else {
            self.create_challenge(challenge).await
        }
    }

    pub async fn create_challenge(&self, challenge: &GuildChallenge) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        let id = challenge.record_id();
        let data = self.codec.encode(challenge)?;
        tracing::debug!(%id, "Creating challenge");
        self.provider
            .create_challenge(self.table_prefix(), &id, &data)
            .await
    }

    pub async fn update_challenge(&self, challenge: &GuildChallenge) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        let id = challenge.record_id();
        let data = self.codec.encode(challenge)?;
        tracing::debug!(%id, "Updating challenge");
        self.provider
            .update_challenge(self.table_prefix(), &id, &data)
            .await
    }

    pub async fn delete_challenge(&self, id: &str) -> Result<(), PersistenceError> {
        if self.read_only() {
            return Ok(());
        }
        tracing::debug!(%id, "Deleting challenge");
        self.provider.delete_challenge(self.table_prefix(), id).await
    }
}
