//! Shared fixtures and an in-memory provider double for adapter tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use guilds_model::{Arena, ArenaLocation, GuildChallenge};
use uuid::Uuid;

use crate::persistence::{ArenaProvider, ChallengeProvider, PersistenceError};
use crate::settings::Settings;

pub fn sample_arena(name: &str) -> Arena {
    let mut arena = Arena::new(name);
    arena.challenger = Some(ArenaLocation::new("world", 12.5, 70.0, -4.25));
    arena.defender = Some(ArenaLocation {
        yaw: 180.0,
        pitch: -10.0,
        ..ArenaLocation::new("world", -12.5, 70.0, 4.25)
    });
    arena
}

pub fn sample_challenge() -> GuildChallenge {
    let mut challenge = GuildChallenge::new(Uuid::new_v4(), Uuid::new_v4(), 60, 1, 4);
    challenge.arena = Some(Uuid::new_v4());
    challenge.accepted = true;
    challenge.challenge_players = vec![Uuid::new_v4(), Uuid::new_v4()];
    challenge.defend_players = vec![Uuid::new_v4()];
    challenge
}

pub fn settings(read_only: bool) -> Arc<Settings> {
    Arc::new(Settings::new(read_only))
}

/// A provider call as observed by [`MemoryProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    CreateContainer,
    Exists(String),
    Ids,
    LoadAll,
    Load(String),
    Create(String),
    Update(String),
    Delete(String),
}

impl ProviderCall {
    fn is_mutation(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Update(_) | Self::Delete(_))
    }
}

/// In-memory provider that logs every call and the prefix it was given.
///
/// `create` on an existing id fails, like an `INSERT` on a primary key.
#[derive(Default)]
pub struct MemoryProvider {
    records: Mutex<BTreeMap<String, String>>,
    calls: Mutex<Vec<(ProviderCall, Option<String>)>>,
}

impl MemoryProvider {
    pub fn with_records<'a>(records: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let provider = Self::default();
        {
            let mut map = provider.records.lock().unwrap();
            for (id, data) in records {
                map.insert(id.to_string(), data.to_string());
            }
        }
        provider
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.lock().unwrap().keys().cloned().collect()
    }

    pub fn data(&self, id: &str) -> Option<String> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutation()).count()
    }

    pub fn prefixes(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    fn log(&self, call: ProviderCall, table_prefix: Option<&str>) {
        self.calls
            .lock()
            .unwrap()
            .push((call, table_prefix.map(str::to_owned)));
    }

    fn exists(&self, table_prefix: Option<&str>, id: &str) -> bool {
        self.log(ProviderCall::Exists(id.to_string()), table_prefix);
        self.records.lock().unwrap().contains_key(id)
    }

    fn all_ids(&self, table_prefix: Option<&str>) -> Vec<String> {
        self.log(ProviderCall::Ids, table_prefix);
        self.ids()
    }

    fn load_all(&self, table_prefix: Option<&str>) -> Vec<String> {
        self.log(ProviderCall::LoadAll, table_prefix);
        self.records.lock().unwrap().values().cloned().collect()
    }

    fn load(&self, table_prefix: Option<&str>, id: &str) -> Option<String> {
        self.log(ProviderCall::Load(id.to_string()), table_prefix);
        self.data(id)
    }

    fn create(&self, table_prefix: Option<&str>, id: &str, data: &str) -> Result<(), PersistenceError> {
        self.log(ProviderCall::Create(id.to_string()), table_prefix);
        let mut records = self.records.lock().unwrap();
        if records.contains_key(id) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("duplicate id {id}"),
            )
            .into());
        }
        records.insert(id.to_string(), data.to_string());
        Ok(())
    }

    fn update(&self, table_prefix: Option<&str>, id: &str, data: &str) {
        self.log(ProviderCall::Update(id.to_string()), table_prefix);
        if let Some(existing) = self.records.lock().unwrap().get_mut(id) {
            *existing = data.to_string();
        }
    }

    fn delete(&self, table_prefix: Option<&str>, id: &str) {
        self.log(ProviderCall::Delete(id.to_string()), table_prefix);
        self.records.lock().unwrap().remove(id);
    }
}

impl ArenaProvider for MemoryProvider {
    async fn create_container(&self, table_prefix: Option<&str>) -> Result<(), PersistenceError> {
        self.log(ProviderCall::CreateContainer, table_prefix);
        Ok(())
    }

    async fn arena_exists(&self, table_prefix: Option<&str>, id: &str) -> Result<bool, PersistenceError> {
        Ok(self.exists(table_prefix, id))
    }

    async fn get_all_arena_ids(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        Ok(self.all_ids(table_prefix))
    }

    async fn get_all_arenas(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        Ok(self.load_all(table_prefix))
    }

    async fn get_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<Option<String>, PersistenceError> {
        Ok(self.load(table_prefix, id))
    }

    async fn create_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.create(table_prefix, id, data)
    }

    async fn update_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.update(table_prefix, id, data);
        Ok(())
    }

    async fn delete_arena(&self, table_prefix: Option<&str>, id: &str) -> Result<(), PersistenceError> {
        self.delete(table_prefix, id);
        Ok(())
    }
}

impl ChallengeProvider for MemoryProvider {
    async fn create_container(&self, table_prefix: Option<&str>) -> Result<(), PersistenceError> {
        self.log(ProviderCall::CreateContainer, table_prefix);
        Ok(())
    }

    async fn challenge_exists(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<bool, PersistenceError> {
        Ok(self.exists(table_prefix, id))
    }

    async fn get_all_challenge_ids(
        &self,
        table_prefix: Option<&str>,
    ) -> Result<Vec<String>, PersistenceError> {
        Ok(self.all_ids(table_prefix))
    }

    async fn get_all_challenges(
        &self,
        table_prefix: Option<&str>,
    ) -> Result<Vec<String>, PersistenceError> {
        Ok(self.load_all(table_prefix))
    }

    async fn get_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<Option<String>, PersistenceError> {
        Ok(self.load(table_prefix, id))
    }

    async fn create_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.create(table_prefix, id, data)
    }

    async fn update_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        self.update(table_prefix, id, data);
        Ok(())
    }

    async fn delete_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<(), PersistenceError> {
        self.delete(table_prefix, id);
        Ok(())
    }
}
