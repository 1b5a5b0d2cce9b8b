use std::time::{Duration, Instant};

/// Counts from one or more matching passes, for status reporting.
#[derive(Debug, Clone, Copy)]
pub struct MatchStats {
    /// Pairs scored or compared
    pub comparisons: u64,
    /// Matches recorded
    pub matches: u64,
    started_at: Instant,
}

impl MatchStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            comparisons: 0,
            matches: 0,
            started_at: Instant::now(),
        }
    }

    /// True if any match was recorded.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.matches > 0
    }

    /// Fold another pass into this one: counts are summed and the earlier start
    /// time is kept, so elapsed time spans both.
    pub fn add(&mut self, other: &MatchStats) -> &mut Self {
        self.comparisons += other.comparisons;
        self.matches += other.matches;
        self.started_at = self.started_at.min(other.started_at);
        self
    }

    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[must_use]
    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed().as_micros()
    }
}

impl Default for MatchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cmp:{}, match:{}, time:{} μs",
            self.comparisons,
            self.matches,
            self.elapsed_micros()
        )
    }
}
