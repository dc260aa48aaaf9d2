//! Best score record
//!
//! A single integer under a fixed key. Read once at startup, written only
//! when a finished run beats it.

use crate::persistence::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "gapwing_high_score";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a score would replace the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it became the new best.
    pub fn commit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from storage. Missing or unparsable values read as no record.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(_) => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    Self::default()
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        store.set_item(Self::STORAGE_KEY, &self.best.to_string());
        log::info!("High score saved ({})", self.best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_commit_only_when_greater() {
        let mut high = HighScore::new(5);
        assert!(!high.commit(5));
        assert!(!high.commit(3));
        assert_eq!(high.best, 5);
        assert!(high.commit(7));
        assert_eq!(high.best, 7);
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);
        HighScore::new(42).save(&mut store);
        assert_eq!(HighScore::load(&store).best, 42);
    }

    #[test]
    fn test_garbage_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.set_item(HighScore::STORAGE_KEY, "NaN");
        assert_eq!(HighScore::load(&store).best, 0);
    }
}
