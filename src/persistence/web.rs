//! Browser LocalStorage backend

use web_sys::Storage;

use super::{HighScoreStore, SAVE_KEY_SCORE};
use crate::error::PersistError;

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable("window.localStorage"))
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u64, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(SAVE_KEY_SCORE) {
            Ok(Some(value)) => Ok(serde_json::from_str(&value)?),
            Ok(None) => Ok(0),
            Err(_) => Err(PersistError::Unavailable("localStorage.getItem")),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        storage
            .set_item(SAVE_KEY_SCORE, &score.to_string())
            .map_err(|_| PersistError::Unavailable("localStorage.setItem"))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}
