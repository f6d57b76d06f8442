//! High score leaderboard
//!
//! Top 5 scores, sorted descending, persisted as JSON. The simulation core
//! never depends on persistence succeeding.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Default initials when the player declines to enter any
pub const DEFAULT_INITIALS: &str = "ACE";

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub initials: String,
    pub score: u64,
    /// Local date string recorded at submission time
    pub date: String,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
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

    /// Add a score; returns the 1-indexed rank achieved, or None if it
    /// did not qualify. Empty initials fall back to the default.
    pub fn add_score(&mut self, initials: &str, score: u64, date: &str) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let initials = if initials.trim().is_empty() {
            DEFAULT_INITIALS.to_string()
        } else {
            initials.trim().to_uppercase()
        };
        let entry = HighScoreEntry {
            initials,
            score,
            date: date.to_string(),
        };

        // Insert sorted descending by score
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

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from a JSON file, falling back to an empty board on any error
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("High score file unreadable ({e}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Write the leaderboard as JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let mut scores = HighScores::new();
        for (i, s) in [300, 100, 500, 200, 400, 250].iter().enumerate() {
            scores.add_score(&format!("P{i}"), *s, "1/1/2026");
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        let values: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![500, 400, 300, 250, 200]);
    }

    #[test]
    fn test_rank_reported() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("AAA", 100, "1/1/2026"), Some(1));
        assert_eq!(scores.add_score("BBB", 200, "1/1/2026"), Some(1));
        assert_eq!(scores.add_score("CCC", 150, "1/1/2026"), Some(2));
    }

    #[test]
    fn test_low_score_rejected_when_full() {
        let mut scores = HighScores::new();
        for s in [500, 400, 300, 250, 200] {
            scores.add_score("XX", s, "1/1/2026");
        }
        assert_eq!(scores.add_score("YY", 100, "1/1/2026"), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_blank_initials_default() {
        let mut scores = HighScores::new();
        scores.add_score("  ", 100, "1/1/2026");
        assert_eq!(scores.entries[0].initials, DEFAULT_INITIALS);
    }
}
