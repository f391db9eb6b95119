//! In-memory leaderboard of completed session scores.
//!
//! Append-only and process-lifetime only: scores survive replays within
//! one run of the program, nothing is written to disk.

#[derive(Debug, Default)]
pub struct Leaderboard {
    scores: Vec<u32>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished session's final score.
    pub fn record(&mut self, score: u32) {
        self.scores.push(score);
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Scores ranked best-first for display.
    pub fn ranked(&self) -> Vec<u32> {
        let mut ranked = self.scores.clone();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        ranked
    }
}
