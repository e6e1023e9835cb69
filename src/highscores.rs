//! High score leaderboard
//!
//! Kept in memory for the lifetime of a session; tracks the top 10 finished
//! runs across difficulties.

use serde::{Deserialize, Serialize};

use crate::config::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Crashed,
    Won,
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub difficulty: Difficulty,
    pub outcome: RunOutcome,
    /// 1-based run number within the session
    pub run: u32,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 1-based position a score would take, `None` if it misses the board.
    /// Zero never places; ties rank behind the entries already there.
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let rank = self.entries.partition_point(|e| e.score >= score);
        (rank < MAX_HIGH_SCORES).then_some(rank + 1)
    }

    pub fn qualifies(&self, score: u32) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Add a finished run. Returns the rank achieved (1-indexed) or None.
    /// Ties keep the earlier run ahead.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        log::info!(
            "run {} ({}, {:?}) placed #{} with {}",
            entry.run,
            entry.difficulty.as_str(),
            entry.outcome,
            rank,
            entry.score
        );
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best entry recorded at a given difficulty
    pub fn best_for(&self, difficulty: Difficulty) -> Option<&HighScoreEntry> {
        self.entries.iter().find(|e| e.difficulty == difficulty)
    }
}
