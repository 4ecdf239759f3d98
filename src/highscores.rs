//! Best score store
//!
//! One number, persisted as JSON under a fixed storage key and compared only
//! at round end.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub best_score: u64,
}

impl BestScore {
    /// Storage key, also the file stem on disk
    pub const STORAGE_KEY: &'static str = "dropgame_best_score";

    pub fn new() -> Self {
        Self::default()
    }

    /// File holding the best score inside `dir`
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", Self::STORAGE_KEY))
    }

    /// Record a finished round. Returns true on a new record (strictly greater).
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Load from `dir`; a missing or unreadable file starts fresh
    pub fn load(dir: &Path) -> Self {
        match Self::try_load(dir) {
            Ok(best) => {
                log::info!("Loaded best score {}", best.best_score);
                best
            }
            Err(err) => {
                log::info!("No best score found ({err}), starting fresh");
                Self::new()
            }
        }
    }

    pub fn try_load(dir: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(Self::path_in(dir))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save to `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::path_in(dir), json)?;
        log::info!("Best score saved ({})", self.best_score);
        Ok(())
    }
}
