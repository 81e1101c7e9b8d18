//! High score persistence
//!
//! A single named slot holding one integer. Backends:
//! - [`MemoryStore`]: in-process, for tests and headless runs
//! - [`FileStore`]: JSON file on native targets
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use crate::error::PersistError;

mod file;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Slot name the high score is stored under
pub const SAVE_KEY_SCORE: &str = "HighScore";

/// Storage for the high score slot
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing has been saved yet
    fn load(&self) -> Result<u64, PersistError>;

    fn save(&mut self, score: u64) -> Result<(), PersistError>;
}

/// Keeps the slot in memory and counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, PersistError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> Result<u64, PersistError> {
        (**self).load()
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        (**self).save(score)
    }
}
