//! Wiring: the context adapters are built from, and the bundle of both
//! record adapters that the rest of the plugin holds on to.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::arenas::ArenaAdapter;
use crate::challenges::ChallengeAdapter;
use crate::codec::JsonCodec;
use crate::database_adapter::DatabaseAdapter;
use crate::persistence::PersistenceError;
use crate::settings::SettingsSource;

/// Plugin-level collaborators shared by every adapter.
#[derive(Clone)]
pub struct StorageContext {
    data_folder: PathBuf,
    settings: Arc<dyn SettingsSource>,
    codec: JsonCodec,
}

impl StorageContext {
    pub fn new(data_folder: PathBuf, settings: Arc<dyn SettingsSource>) -> Self {
        Self {
            data_folder,
            settings,
            codec: JsonCodec::default(),
        }
    }

    pub fn with_codec(mut self, codec: JsonCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Root folder; JSON records live in per-type subdirectories.
    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn settings(&self) -> Arc<dyn SettingsSource> {
        Arc::clone(&self.settings)
    }

    pub fn codec(&self) -> JsonCodec {
        self.codec
    }
}

/// Both record adapters, bound to the same backend.
pub struct GuildStorage {
    pub arenas: ArenaAdapter,
    pub challenges: ChallengeAdapter,
}

impl GuildStorage {
    pub fn new(ctx: &StorageContext, db: &DatabaseAdapter) -> Result<Self, PersistenceError> {
        Ok(Self {
            arenas: ArenaAdapter::new(ctx, db)?,
            challenges: ChallengeAdapter::new(ctx, db)?,
        })
    }

    /// Ensure the directories or tables for every record type exist.
    pub async fn create_containers(&self) -> Result<(), PersistenceError> {
        self.arenas.create_container().await?;
        self.challenges.create_container().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::StoreKind;
    use crate::settings::Settings;
    use crate::test_support::sample_arena;

    #[tokio::test]
    async fn test_create_containers_json() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = StorageContext::new(dir.path().to_path_buf(), Arc::new(Settings::default()));
        let storage = GuildStorage::new(&ctx, &DatabaseAdapter::json()).unwrap();
        assert_eq!(storage.arenas.provider().kind(), StoreKind::Json);
        storage.create_containers().await.unwrap();
        assert!(dir.path().join("arenas").is_dir());
        assert!(dir.path().join("challenges").is_dir());
    }

    #[tokio::test]
    async fn test_pretty_codec_reaches_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = StorageContext::new(dir.path().to_path_buf(), Arc::new(Settings::default()))
            .with_codec(JsonCodec::pretty());
        let storage = GuildStorage::new(&ctx, &DatabaseAdapter::json()).unwrap();
        let arena = sample_arena("Pit");
        let id = arena.id.to_string();
        storage.arenas.save_arena(&arena).await.unwrap();

        let path = dir.path().join("arenas").join(format!("{id}.json"));
        assert!(std::fs::read_to_string(path).unwrap().contains('\n'));
        assert_eq!(storage.arenas.get_arena(&id).await.unwrap(), Some(arena));
    }

    #[test]
    fn test_context_shares_settings() {
        let settings = Arc::new(Settings::default());
        let ctx = StorageContext::new(PathBuf::from("/data"), settings.clone());
        settings.set_read_only(true);
        assert!(ctx.settings().read_only());
        assert_eq!(ctx.data_folder(), Path::new("/data"));
    }
}
