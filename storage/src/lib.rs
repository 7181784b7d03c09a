//! Storage adapters for guild arenas and challenges.
//!
//! Each record type gets an adapter ([`ArenaAdapter`], [`ChallengeAdapter`])
//! that picks one provider at construction from the configured
//! [`DatabaseBackend`], serializes records through a [`RecordCodec`], and
//! skips every mutation while the read-only flag is set.
//!
//! ```text
//! caller -> adapter -> read-only check -> provider -> JSON files | SQL table
//! ```

pub mod arenas;
pub mod backend;
pub mod challenges;
pub mod codec;
pub mod config;
pub mod database_adapter;
pub mod guild_storage;
pub mod migrate;
pub mod persistence;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use arenas::ArenaAdapter;
pub use backend::DatabaseBackend;
pub use challenges::ChallengeAdapter;
pub use codec::{JsonCodec, RecordCodec, Storable};
pub use config::DatabaseConfig;
pub use database_adapter::DatabaseAdapter;
pub use guild_storage::{GuildStorage, StorageContext};
pub use migrate::{migrate_records, MigrationReport};
pub use persistence::sql::Database;
pub use persistence::{ArenaProvider, ChallengeProvider, PersistenceError, RecordStore, StoreKind};
pub use settings::{Settings, SettingsSource};
