//! Best-score record
//!
//! A single integer persisted as a string under one storage key. Missing or
//! unparsable values count as zero.

use crate::persistence::Storage;

/// Persists the best score across sessions
#[derive(Debug)]
pub struct ScoreStore<S: Storage> {
    storage: S,
    best: u32,
}

impl<S: Storage> ScoreStore<S> {
    /// Storage key, shared with earlier releases of the game
    pub const STORAGE_KEY: &'static str = "max-score";

    /// Read the stored best score
    pub fn load(storage: S) -> Self {
        let best = match storage.get_item(Self::STORAGE_KEY) {
            Some(raw) => parse_score(&raw),
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        };
        log::info!("Loaded high score {best}");
        Self { storage, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Persist `score` if it beats the record. Returns true if it was written.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.storage
            .set_item(Self::STORAGE_KEY, &score.to_string());
        log::info!("New high score {score} saved");
        true
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn parse_score(raw: &str) -> u32 {
    match raw.trim().parse() {
        Ok(score) => score,
        Err(_) => {
            log::warn!("Ignoring malformed high score {raw:?}");
            0
        }
    }
}
