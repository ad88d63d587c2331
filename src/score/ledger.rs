//! Persisted best score per stage.
//!
//! Stores are key/value backends (`BestScoreStore`); the ledger decides what
//! to write and swallows backend failures. Reads that fail count as 0 and
//! writes that fail are skipped, both with a warning.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Key under which the best score of `stage` is persisted.
#[must_use]
pub fn best_score_key(stage: usize) -> String {
    format!("BestScore{stage}")
}

/// Key/value persistence backend for best scores.
pub trait BestScoreStore {
    /// Read a stored value. `Ok(None)` if the key was never written.
    fn load(&self, key: &str) -> Result<Option<i64>, LedgerError>;

    /// Write a value.
    fn store(&mut self, key: &str, value: i64) -> Result<(), LedgerError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, i64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<i64>, LedgerError> {
        Ok(self.values.get(key).copied())
    }

    fn store(&mut self, key: &str, value: i64) -> Result<(), LedgerError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten on every write.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonFileStore {
    /// Open the file at `path`. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        let values: BTreeMap<String, i64> = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<i64>, LedgerError> {
        Ok(self.values.get(key).copied())
    }

    fn store(&mut self, key: &str, value: i64) -> Result<(), LedgerError> {
        let previous = self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            // Keep memory consistent with disk
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// Best-score bookkeeping on top of a store.
#[derive(Clone, Debug, Default)]
pub struct BestScoreLedger<S> {
    store: S,
}

impl<S: BestScoreStore> BestScoreLedger<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Best score recorded for `stage`, 0 if none or unreadable.
    #[must_use]
    pub fn best_score(&self, stage: usize) -> i64 {
        let key = best_score_key(stage);
        match self.store.load(&key) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                0
            }
        }
    }

    /// Record a finished round. Writes only when `score` strictly beats the
    /// stored best; returns whether it did.
    pub fn record(&mut self, stage: usize, score: i64) -> bool {
        let best = self.best_score(stage);
        if score <= best {
            return false;
        }

        let key = best_score_key(stage);
        match self.store.store(&key, score) {
            Ok(()) => {
                log::info!("New best score for stage {}: {} (was {})", stage, score, best);
                true
            }
            Err(e) => {
                log::warn!("Failed to write {}: {}", key, e);
                false
            }
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Persistence backend errors.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
