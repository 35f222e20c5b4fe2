//! Best-score tracking
//!
//! The best score is read once when a session starts and written back as
//! max(previous, final) after every run.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Best score seen across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Read from the store; an unreadable store starts fresh
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.get() {
            Ok(best) => {
                log::info!("Loaded high score {best}");
                Self { best }
            }
            Err(e) => {
                log::warn!("High score unavailable ({e}), starting fresh");
                Self::default()
            }
        }
    }

    /// Whether a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Fold a finished run in. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        let improved = self.qualifies(score);
        self.best = self.best.max(score);
        improved
    }

    /// Pick up a better score stored by another session since we last looked
    pub fn refresh(&mut self, store: &dyn ScoreStore) {
        match store.get() {
            Ok(stored) if stored > self.best => {
                log::debug!("High score raised elsewhere: {} -> {stored}", self.best);
                self.best = stored;
            }
            Ok(_) => {}
            Err(e) => log::warn!("High score unavailable ({e}), keeping {}", self.best),
        }
    }

    /// Write the best score back, never lowering what is already stored.
    /// Failures are logged and otherwise ignored.
    pub fn save(&mut self, store: &mut dyn ScoreStore) {
        self.refresh(store);
        if let Err(e) = store.set(self.best) {
            log::warn!("Failed to save high score {}: {e}", self.best);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, PersistenceError};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self) -> Result<u64, PersistenceError> {
            Err(PersistenceError::Unavailable)
        }

        fn set(&mut self, _score: u64) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable)
        }
    }

    #[test]
    fn test_record_keeps_max() {
        let mut high = HighScore::new(500);
        assert!(!high.record(120));
        assert_eq!(high.best, 500);
        assert!(!high.record(500));
        assert!(high.record(501));
        assert_eq!(high.best, 501);
    }

    #[test]
    fn test_load_and_save() {
        let mut store = MemoryStore::with_score(77);
        let mut high = HighScore::load(&store);
        assert_eq!(high.best, 77);
        high.record(300);
        high.save(&mut store);
        assert_eq!(store.get().unwrap(), 300);
    }

    #[test]
    fn test_save_keeps_higher_stored_score() {
        let mut store = MemoryStore::with_score(100);
        let mut high = HighScore::load(&store);
        // Another session stores a better score meanwhile
        store.set(900).unwrap();
        high.record(400);
        high.save(&mut store);
        assert_eq!(store.get().unwrap(), 900);
        assert_eq!(high.best, 900);
    }

    #[test]
    fn test_refresh_only_raises() {
        let mut high = HighScore::new(50);
        high.refresh(&MemoryStore::with_score(20));
        assert_eq!(high.best, 50);
        high.refresh(&MemoryStore::with_score(70));
        assert_eq!(high.best, 70);
        high.refresh(&BrokenStore);
        assert_eq!(high.best, 70);
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut store = BrokenStore;
        let mut high = HighScore::load(&store);
        assert_eq!(high, HighScore::default());
        high.save(&mut store);
    }
}
