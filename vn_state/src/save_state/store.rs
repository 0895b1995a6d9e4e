//! File-backed save store.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{SaveState, StateValue};

/// Errors raised while writing the save file.
///
/// Reading never fails: an unreadable save is treated as no save at all.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize save state: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Owns the [`SaveState`] and the JSON file it lives in.
///
/// Every mutation rewrites the whole file before returning, so an answer the
/// player has seen accepted is always on disk.
#[derive(Debug)]
pub struct SaveStore {
    path: PathBuf,
    state: SaveState,
}

impl SaveStore {
    /// Open the store at `path`, loading whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = Self::load(&path);
        Self { path, state }
    }

    /// Read a save file.
    ///
    /// A missing, unreadable, or malformed file yields an empty state.
    pub fn load(path: &Path) -> SaveState {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No save file at {}, starting fresh", path.display());
                return SaveState::new();
            }
            Err(e) => {
                tracing::warn!("Could not read save file {}: {}", path.display(), e);
                return SaveState::new();
            }
        };

        match serde_json::from_str::<SaveState>(&content) {
            Ok(state) => {
                tracing::debug!("Loaded {} keys from {}", state.len(), path.display());
                state
            }
            Err(e) => {
                tracing::warn!("Ignoring unparsable save file {}: {}", path.display(), e);
                SaveState::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    /// Get a stored value, or `default` if absent.
    pub fn get(&self, key: &str, default: impl Into<StateValue>) -> StateValue {
        self.state.get_or(key, default)
    }

    /// Store a value and flush the file.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StateValue>,
    ) -> StoreResult<()> {
        let key = key.into();
        let value = value.into();
        tracing::debug!("Saving {} = {}", key, value);
        self.state.insert(key, value);
        self.flush()
    }

    /// Remove a value and flush the file.
    pub fn remove(&mut self, key: &str) -> StoreResult<Option<StateValue>> {
        let removed = self.state.remove(key);
        if removed.is_some() {
            self.flush()?;
        }
        Ok(removed)
    }

    /// Forget everything, including progress, and flush the empty state.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.state.clear();
        self.flush()
    }

    /// Rewrite the save file from the in-memory state.
    ///
    /// Writes a sibling temp file and renames it over the target.
    pub fn flush(&self) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&self.state)?;
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let temp_path = temp_path(&self.path);
        fs::write(&temp_path, content).map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;

        tracing::debug!("Flushed {} keys to {}", self.state.len(), self.path.display());
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KEY_CURRENT_DAY;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::open(dir.path().join("save.json"));
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_invalid_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SaveStore::open(&path);
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_non_object_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "null").unwrap();
        assert!(SaveStore::load(&path).is_empty());

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(SaveStore::load(&path).is_empty());
    }

    #[test]
    fn test_set_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");

        let mut store = SaveStore::open(&path);
        store.set("name", "Clayn").unwrap();
        store.set("pregnancy", false).unwrap();
        store
            .set("drinks", vec!["Tea".to_string(), "Tea".to_string()])
            .unwrap();
        store.set(KEY_CURRENT_DAY, 2u32).unwrap();

        let reloaded = SaveStore::open(&path);
        assert_eq!(reloaded.state(), store.state());
        assert_eq!(reloaded.get("name", ""), StateValue::from("Clayn"));
        assert_eq!(reloaded.state().current_day(), 2);
    }

    #[test]
    fn test_unknown_values_are_not_dropped_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(
            &path,
            r#"{"current_day": 2.0, "name": "Aria", "note": null, "picks": [["A", "B"]]}"#,
        )
        .unwrap();

        let mut store = SaveStore::open(&path);
        assert_eq!(store.state().len(), 4);
        assert_eq!(store.state().current_day(), 2);
        assert_eq!(store.state().name(), Some("Aria"));

        store.set("drink", "Tea").unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            saved,
            serde_json::json!({
                "current_day": 2.0,
                "drink": "Tea",
                "name": "Aria",
                "note": null,
                "picks": [["A", "B"]],
            })
        );
    }

    #[test]
    fn test_file_is_pretty_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");

        let mut store = SaveStore::open(&path);
        store.set("name", "Ryū").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"name\": \"Ryū\"\n}");
        assert!(!dir.path().join("save.json.tmp").exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saves").join("slot1.json");

        let mut store = SaveStore::open(&path);
        store.set("name", "Clayn").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reset_and_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");

        let mut store = SaveStore::open(&path);
        store.set("name", "Clayn").unwrap();
        store.set("drink", "Tea").unwrap();

        assert_eq!(store.remove("drink").unwrap(), Some(StateValue::from("Tea")));
        assert_eq!(store.remove("drink").unwrap(), None);
        assert_eq!(SaveStore::load(&path).len(), 1);

        store.reset().unwrap();
        assert!(SaveStore::load(&path).is_empty());
    }

    #[test]
    fn test_write_failure_propagates() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("save.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let mut store = SaveStore::open(&path);
        let err = store.set("name", "Clayn").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
