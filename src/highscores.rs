//! Session leaderboard
//!
//! Finished runs ranked by score, ties broken by frames survived. The board
//! lives as long as the page; nothing is persisted.

/// Runs kept on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRecord {
    pub score: u64,
    /// Frames survived before the last life was lost
    pub frames: u64,
    /// Seed the run was played with, enough to replay it
    pub seed: u64,
}

impl RunRecord {
    fn beats(&self, other: &RunRecord) -> bool {
        (self.score, self.frames) > (other.score, other.frames)
    }
}

/// Best runs first
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    runs: Vec<RunRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns its 1-based rank, or `None` if it did
    /// not make the board. A run that ties an existing one ranks below it.
    pub fn record(&mut self, run: RunRecord) -> Option<usize> {
        if run.score == 0 {
            return None;
        }
        let index = self.runs.partition_point(|kept| !run.beats(kept));
        if index >= MAX_HIGH_SCORES {
            return None;
        }
        self.runs.insert(index, run);
        self.runs.truncate(MAX_HIGH_SCORES);

        log::info!(
            "Run ranked #{}: score {} over {} frames (seed {})",
            index + 1,
            run.score,
            run.frames,
            run.seed
        );
        Some(index + 1)
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.runs.first()
    }

    /// Text for the game-over score line, given the rank `record` returned
    pub fn final_score_text(&self, score: u64, rank: Option<usize>) -> String {
        match (rank, self.best()) {
            (Some(1), _) => format!("{} (new best!)", score),
            (Some(n), Some(best)) => format!("{} (#{}, best {})", score, n, best.score),
            (None, Some(best)) => format!("{} (best {})", score, best.score),
            _ => score.to_string(),
        }
    }
}
