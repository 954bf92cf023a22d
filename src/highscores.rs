//! High score leaderboard system
//!
//! Persisted as JSON next to the level files, tracks top 10 scores.

use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::platform::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Storage key of the leaderboard
pub const STORAGE_KEY: &str = "highscores.json";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            timestamp,
        };

        // Sorted descending; ties keep the older entry first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Leaderboard as printable lines
    pub fn table(&self) -> String {
        if self.is_empty() {
            return "No high scores yet.".to_string();
        }
        let mut out = String::from("Rank  Score  Level\n");
        for (i, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(out, "{:>4}  {:>5}  {:>5}", i + 1, entry.score, entry.level);
        }
        out
    }

    /// Load from storage; a missing or corrupt file gives an empty board
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(json) = storage.read(STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(err) => {
                log::warn!("Ignoring corrupt {STORAGE_KEY}: {err}");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| GameError::invalid(format!("cannot encode high scores: {err}")))?;
        storage
            .write(STORAGE_KEY, &json)
            .map_err(|source| GameError::Io {
                name: STORAGE_KEY.to_string(),
                source,
            })?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Seconds since the Unix epoch (0 if the clock is before it)
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
