//! High-score storage backends
//!
//! The game only needs get/set of a single integer. Backends:
//! - `MemoryStore`: in-process, for tests and throwaway sessions
//! - `FileStore`: JSON file (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm)

use thiserror::Error;

/// Storage key for the best score, shared by every backend
pub const HIGH_SCORE_KEY: &str = "void_high_score";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value `{0}` is not a score")]
    Corrupt(String),
    #[error("storage unavailable")]
    Unavailable,
}

/// Get/set access to the persisted high score
pub trait ScoreStore {
    /// Stored score, or 0 if nothing has been stored yet
    fn get(&self) -> Result<u64, PersistenceError>;
    fn set(&mut self, score: u64) -> Result<(), PersistenceError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { value: Some(score) }
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> Result<u64, PersistenceError> {
        Ok(self.value.unwrap_or(0))
    }

    fn set(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.value = Some(score);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use super::{HIGH_SCORE_KEY, PersistenceError, ScoreStore};

    /// JSON object on disk, keyed like the browser store
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_map(&self) -> Result<BTreeMap<String, u64>, PersistenceError> {
            match std::fs::read_to_string(&self.path) {
                Ok(json) => Ok(serde_json::from_str(&json)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }
    }

    impl ScoreStore for FileStore {
        fn get(&self) -> Result<u64, PersistenceError> {
            Ok(self.read_map()?.get(HIGH_SCORE_KEY).copied().unwrap_or(0))
        }

        fn set(&mut self, score: u64) -> Result<(), PersistenceError> {
            // Keep unrelated keys; a corrupt file is replaced
            let mut map = self.read_map().unwrap_or_default();
            map.insert(HIGH_SCORE_KEY.to_string(), score);
            // Write-then-rename keeps the previous file intact on failure
            let tmp = self.path.with_extension("tmp");
            std::fs::write(&tmp, serde_json::to_string_pretty(&map)?)?;
            std::fs::rename(&tmp, &self.path)?;
            log::debug!("high score {score} written to {}", self.path.display());
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{HIGH_SCORE_KEY, PersistenceError, ScoreStore};

    /// Browser LocalStorage, value stored as a decimal string
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)
    }

    impl ScoreStore for LocalStorageStore {
        fn get(&self) -> Result<u64, PersistenceError> {
            let raw = storage()?
                .get_item(HIGH_SCORE_KEY)
                .map_err(|_| PersistenceError::Unavailable)?;
            match raw {
                Some(text) => text
                    .trim()
                    .parse()
                    .map_err(|_| PersistenceError::Corrupt(text)),
                None => Ok(0),
            }
        }

        fn set(&mut self, score: u64) -> Result<(), PersistenceError> {
            storage()?
                .set_item(HIGH_SCORE_KEY, &score.to_string())
                .map_err(|_| PersistenceError::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get().unwrap(), 0);
        store.set(420).unwrap();
        assert_eq!(store.get().unwrap(), 420);
        assert_eq!(MemoryStore::with_score(9).get().unwrap(), 9);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store() {
        let dir = std::env::temp_dir().join(format!("void-runner-store-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scores.json");

        let mut store = FileStore::new(&path);
        assert_eq!(store.get().unwrap(), 0);
        store.set(1234).unwrap();
        assert_eq!(FileStore::new(&path).get().unwrap(), 1234);

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains(HIGH_SCORE_KEY));

        std::fs::write(&path, "garbage").unwrap();
        assert!(matches!(store.get(), Err(PersistenceError::Json(_))));
        // Writing over a corrupt file recovers it
        store.set(7).unwrap();
        assert_eq!(store.get().unwrap(), 7);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
