//! Persistent save data
//!
//! The engine is storage-agnostic: the embedding loads and stores the JSON
//! blob wherever it likes and hands [`SaveData`] in when starting a
//! session. Tracks lifetime stats, unlocked achievements, and the top-10
//! leaderboard.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sim::achievements::LifetimeStats;
use crate::tuning::AchievementId;

/// Leaderboard capacity
pub const MAX_HIGH_SCORES: usize = 10;

/// One recorded run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Wave reached when the run ended
    pub wave: u32,
    /// Unix milliseconds from the host's clock
    pub timestamp: f64,
}

/// Best-first leaderboard, capped at [`MAX_HIGH_SCORES`] entries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Whether `score` would earn a slot. Zero never ranks, and a tie loses
    /// to the sitting entry.
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Index the score would be inserted at, keeping the descending order
    fn insertion_index(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// 1-indexed rank `score` would land at, `None` when it misses the table
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score)
            .then(|| self.insertion_index(score) + 1)
    }

    /// Records a qualifying run and returns its 1-indexed rank
    pub fn add_score(&mut self, score: u64, wave: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let index = self.insertion_index(score);
        self.entries.insert(index, HighScoreEntry { score, wave, timestamp });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Everything a profile persists between runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveData {
    pub lifetime: LifetimeStats,
    pub unlocked: BTreeSet<AchievementId>,
    pub high_scores: HighScores,
}

impl SaveData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a save blob, falling back to a fresh profile on any error so
    /// a corrupt save never blocks play.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("failed to parse save data, starting fresh: {err}");
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_leaderboard() {
        let scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.top_score(), None);
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_add_scores_sorted() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(100, 1, 0.0), Some(1));
        assert_eq!(scores.add_score(200, 2, 0.0), Some(1));
        assert_eq!(scores.add_score(150, 3, 0.0), Some(2));
        assert_eq!(scores.top_score(), Some(200));
        assert_eq!(scores.entries.len(), 3);
    }

    #[test]
    fn test_leaderboard_caps_at_ten() {
        let mut scores = HighScores::new();
        for i in 1..=15u64 {
            scores.add_score(i * 10, i as u32, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // Lowest surviving entry is 60
        assert_eq!(scores.entries.last().map(|e| e.score), Some(60));
        assert!(!scores.qualifies(50));
        assert_eq!(scores.potential_rank(65), Some(10));
    }

    #[test]
    fn test_save_data_round_trip() {
        let mut data = SaveData::new();
        data.lifetime.total_kills = 42;
        data.unlocked.insert(AchievementId::FirstBlood);
        data.high_scores.add_score(500, 3, 0.0);

        let json = data.to_json().unwrap();
        let back = SaveData::from_json(&json);
        assert_eq!(back.lifetime.total_kills, 42);
        assert!(back.unlocked.contains(&AchievementId::FirstBlood));
        assert_eq!(back.high_scores.top_score(), Some(500));
    }

    #[test]
    fn test_corrupt_save_starts_fresh() {
        let data = SaveData::from_json("{not json");
        assert_eq!(data.lifetime.total_kills, 0);
        assert!(data.unlocked.is_empty());
    }
}
