//! High score tracking
//!
//! One running best score, loaded from a [`HighScoreStore`] and written back
//! only when beaten.

use crate::persistence::HighScoreStore;

/// Running high score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Load from storage; an unreadable slot counts as no high score
    pub fn load(store: &impl HighScoreStore) -> Self {
        match store.load() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(err) => {
                log::warn!("Could not load high score: {}", err);
                Self::default()
            }
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Raise the best score and persist it if `score` beats it.
    /// Returns whether the score was a new high.
    pub fn record(&mut self, score: u64, store: &mut impl HighScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        if let Err(err) = store.save(score) {
            log::warn!("Could not save high score {}: {}", score, err);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistError;
    use crate::persistence::MemoryStore;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u64, PersistError> {
            Err(PersistError::Unavailable("test"))
        }

        fn save(&mut self, _score: u64) -> Result<(), PersistError> {
            Err(PersistError::Unavailable("test"))
        }
    }

    #[test]
    fn test_record_only_when_beaten() {
        let mut store = MemoryStore::with_score(100);
        let mut high = HighScore::load(&store);
        assert_eq!(high.best(), 100);

        assert!(!high.record(100, &mut store));
        assert!(!high.record(50, &mut store));
        assert_eq!(store.saves(), 0);

        assert!(high.record(120, &mut store));
        assert_eq!(high.best(), 120);
        assert_eq!(store.saves(), 1);
        assert_eq!(store.load().unwrap(), 120);
    }

    #[test]
    fn test_broken_store_degrades_gracefully() {
        let mut store = BrokenStore;
        let mut high = HighScore::load(&store);
        assert_eq!(high.best(), 0);
        assert!(high.record(10, &mut store));
        assert_eq!(high.best(), 10);
    }
}
