//! Key/value persistence of learner state.
//!
//! Three blobs are stored per student: the achievement unlock state, the
//! learning profile and the performance history. Values are JSON strings.
//! A blob that fails to parse is treated as absent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::achievements::{AchievementManager, SavedAchievement};
use crate::adaptive::{LearningProfile, PerformanceRecord};
use crate::error::{StoreError, StoreResult};

pub const ACHIEVEMENTS_KEY: &str = "grammar-achievements";
pub const LEARNING_PROFILE_KEY: &str = "grammar-learning-profile";
pub const PERFORMANCE_HISTORY_KEY: &str = "grammar-performance-history";

pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under `dir`. The directory is created on
/// first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a half-written blob.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "state written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn StateStore, key: &str, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Missing and unparsable blobs both come back as `None`; only storage
/// failures are errors.
pub fn load_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> StoreResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key, error = %err, "discarding corrupt persisted state");
            Ok(None)
        }
    }
}

pub fn save_learning_profile(store: &dyn StateStore, profile: &LearningProfile) -> StoreResult<()> {
    save_json(store, LEARNING_PROFILE_KEY, profile)
}

pub fn load_learning_profile(store: &dyn StateStore) -> StoreResult<Option<LearningProfile>> {
    load_json(store, LEARNING_PROFILE_KEY)
}

pub fn save_performance_history(store: &dyn StateStore, history: &[PerformanceRecord]) -> StoreResult<()> {
    save_json(store, PERFORMANCE_HISTORY_KEY, history)
}

pub fn load_performance_history(store: &dyn StateStore) -> StoreResult<Option<Vec<PerformanceRecord>>> {
    load_json(store, PERFORMANCE_HISTORY_KEY)
}

pub fn save_achievements(store: &dyn StateStore, manager: &AchievementManager) -> StoreResult<()> {
    save_json(store, ACHIEVEMENTS_KEY, &manager.saved_state())
}

/// Restores the manager reconciled against the current catalogue, or a
/// fresh one when nothing usable is stored.
pub fn load_achievements(store: &dyn StateStore) -> StoreResult<AchievementManager> {
    let saved: Option<Vec<SavedAchievement>> = load_json(store, ACHIEVEMENTS_KEY)?;
    Ok(match saved {
        Some(saved) => AchievementManager::from_saved(&saved),
        None => AchievementManager::new(),
    })
}
