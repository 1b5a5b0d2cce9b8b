use crate::core::file::ImportableFile;
use crate::core::target::Recipient;
use crate::matching::scoring::{score_strings, ScoreMode, ScoringStrategy};

/// Scores recipients against greeting files.
///
/// A file may be named after the community alone, or after the community and
/// group in either order, so every composition is tried and the best score
/// wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipientScoring;

impl ScoringStrategy<Recipient, ImportableFile> for RecipientScoring {
    fn score(&self, left: &Recipient, right: &ImportableFile, mode: ScoreMode) -> u32 {
        left.candidate_labels()
            .iter()
            .map(|label| score_strings(label, &right.title, mode))
            .max()
            .unwrap_or(0)
    }
}
