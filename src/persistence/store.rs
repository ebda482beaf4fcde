//! Best-score stores

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or writing a stored best score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed best-score json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed best-score value: {0:?}")]
    Parse(String),

    #[error("storage unavailable")]
    Unavailable,
}

/// Somewhere the session best survives between sessions
pub trait BestScoreStore {
    /// Read the stored best. Absence is `Ok(0)`, not an error.
    fn try_load_best(&self) -> Result<u64, StoreError>;

    /// Write the best back
    fn save_best(&mut self, best: u64) -> Result<(), StoreError>;

    /// Read the stored best, falling back to 0 on any failure
    fn load_best(&self) -> u64 {
        match self.try_load_best() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not read best score, starting from 0: {}", e);
                0
            }
        }
    }
}

/// In-process store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
    /// Number of writes so far
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        Self {
            best: Some(best),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<u64> {
        self.best
    }
}

impl BestScoreStore for MemoryStore {
    fn try_load_best(&self) -> Result<u64, StoreError> {
        Ok(self.best.unwrap_or(0))
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = Some(best);
        self.saves += 1;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BestRecord {
    best: u64,
}

/// JSON file store (`{"best": n}`)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl BestScoreStore for FileStore {
    fn try_load_best(&self) -> Result<u64, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: BestRecord = serde_json::from_str(&json)?;
        Ok(record.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&BestRecord { best })?;
        // Write to a sibling temp file then rename so a crash never leaves half a record
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", best, self.path.display());
        Ok(())
    }
}

/// LocalStorage store (WASM only). The value is the plain decimal best.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "astro_dodge_best";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn try_load_best(&self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(value)) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| StoreError::Parse(value)),
            Ok(None) => Ok(0),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &best.to_string())
            .map_err(|_| StoreError::Unavailable)?;
        log::info!("Best score {} saved", best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("astro_dodge_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_best(), 0);
        store.save_best(42).unwrap();
        assert_eq!(store.load_best(), 42);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_file_store_missing_file_is_zero() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.try_load_best().unwrap(), 0);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round_trip");
        let mut store = FileStore::new(&path);
        store.save_best(137).unwrap();
        assert_eq!(FileStore::new(&path).load_best(), 137);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_falls_back_to_zero() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.try_load_best(), Err(StoreError::Json(_))));
        assert_eq!(store.load_best(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
