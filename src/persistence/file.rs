//! JSON file backend
//!
//! The file holds an object of named slots, e.g. `{ "HighScore": 1200 }`.
//! Writes go to a temporary file first and are renamed into place.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighScoreStore, SAVE_KEY_SCORE};
use crate::error::PersistError;

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

    fn read_slots(&self) -> Result<BTreeMap<String, u64>, PersistError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u64, PersistError> {
        let slots = self.read_slots()?;
        Ok(slots.get(SAVE_KEY_SCORE).copied().unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        // A corrupt file is replaced rather than blocking the save
        let mut slots = self.read_slots().unwrap_or_else(|err| {
            log::warn!("Discarding unreadable {}: {}", self.path.display(), err);
            BTreeMap::new()
        });
        slots.insert(SAVE_KEY_SCORE.to_string(), score);

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&slots)?)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}
