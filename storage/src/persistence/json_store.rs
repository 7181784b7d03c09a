use super::PersistenceError;
use std::path::{Component, Path, PathBuf};

/// JSON-file-per-record store: `<dir>/<id>.json` holds one serialized record.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of the record file for `id`. The id must be a single plain
    /// file-name component so it cannot leave the store directory.
    pub fn file_path(&self, id: &str) -> Result<PathBuf, PersistenceError> {
        validate_record_id(id)?;
        Ok(self.dir.join(format!("{}.json", id)))
    }

    pub fn exists(&self, id: &str) -> Result<bool, PersistenceError> {
        Ok(self.file_path(id)?.is_file())
    }

    /// Ids of every record file, sorted. A missing directory holds no records.
    pub fn ids(&self) -> Result<Vec<String>, PersistenceError> {
        if !self.dir.exists() {
            return Ok(vec![]);
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if validate_record_id(stem).is_ok() => ids.push(stem.to_string()),
                _ => tracing::warn!("Ignoring record file with unusable name {:?}", path),
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Load a record by id. Returns None if not found.
    pub fn load(&self, id: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.file_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    /// Load every record, skipping files that cannot be read.
    pub fn load_all(&self) -> Result<Vec<String>, PersistenceError> {
        let mut items = Vec::new();
        for id in self.ids()? {
            let path = self.file_path(&id)?;
            match std::fs::read_to_string(&path) {
                Ok(contents) => items.push(contents),
                Err(e) => {
                    tracing::warn!("Failed to read file {:?}: {}", path, e);
                }
            }
        }
        Ok(items)
    }

    /// Write the record file, replacing any previous contents.
    pub fn write(&self, id: &str, data: &str) -> Result<(), PersistenceError> {
        self.ensure_dir()?;
        std::fs::write(self.file_path(id)?, data)?;
        Ok(())
    }

    /// Delete a record by id. Deleting a missing record is a no-op.
    pub fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        let path = self.file_path(id)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

fn validate_record_id(id: &str) -> Result<(), PersistenceError> {
    let mut components = Path::new(id).components();
    let single_name = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();
    if single_name && !id.contains(['/', '\\', '\0']) {
        Ok(())
    } else {
        Err(PersistenceError::InvalidRecordId(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("arenas"))
    }

    #[test]
    fn test_write_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write("a1", r#"{"name":"Pit"}"#).unwrap();
        assert_eq!(store.load("a1").unwrap().as_deref(), Some(r#"{"name":"Pit"}"#));
        assert!(store.exists("a1").unwrap());
    }

    #[test]
    fn test_load_nonexistent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_dir().unwrap();
        assert_eq!(store.load("nonexistent").unwrap(), None);
        assert!(!store.exists("nonexistent").unwrap());
    }

    #[test]
    fn test_ids_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write("b", "{}").unwrap();
        store.write("a", "{}").unwrap();
        std::fs::write(store.dir().join("notes.txt"), "ignored").unwrap();
        assert_eq!(store.ids().unwrap(), vec!["a", "b"]);
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.ids().unwrap().is_empty());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write("gone", "{}").unwrap();
        store.delete("gone").unwrap();
        store.delete("gone").unwrap();
        assert!(!store.exists("gone").unwrap());
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_dir().unwrap();
        store.ensure_dir().unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_ids_cannot_escape_store_dir() {
        let dir = tempfile::tempdir().unwrap();
        let arenas = store_in(&dir);
        let challenges = JsonStore::new(dir.path().join("challenges"));
        challenges.write("c1", "{}").unwrap();

        for id in ["../challenges/c1", "..", ".", "", "a/b", "/tmp/x", "a\\b", "nul\0id"] {
            assert!(
                matches!(arenas.exists(id), Err(PersistenceError::InvalidRecordId(_))),
                "{id:?} should be rejected"
            );
            assert!(arenas.delete(id).is_err(), "{id:?}");
            assert!(arenas.write(id, "{}").is_err(), "{id:?}");
            assert!(arenas.load(id).is_err(), "{id:?}");
        }
        assert!(challenges.exists("c1").unwrap());
    }

    #[test]
    fn test_dotted_names_are_plain_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write("a..b", "{}").unwrap();
        assert!(store.exists("a..b").unwrap());
        assert_eq!(store.ids().unwrap(), vec!["a..b"]);
    }
}
