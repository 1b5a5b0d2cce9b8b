use std::fmt::Display;

use strsim::normalized_levenshtein;

/// Which comparison a pass asks the scorer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// Compare strings as written
    Ratio,
    /// Compare strings with their whitespace-separated tokens sorted, so word
    /// order does not matter
    TokenSort,
}

/// Pluggable similarity function for the fuzzy and token passes.
///
/// Scores are in `0..=100`. Strategies that depend on external data must not
/// fail: on trouble they return a low score so one bad value cannot abort a
/// whole pass.
pub trait ScoringStrategy<L, R> {
    fn score(&self, left: &L, right: &R, mode: ScoreMode) -> u32;
}

/// Any `Fn(&L, &R, ScoreMode) -> u32` closure is a strategy.
impl<L, R, F> ScoringStrategy<L, R> for F
where
    F: Fn(&L, &R, ScoreMode) -> u32,
{
    fn score(&self, left: &L, right: &R, mode: ScoreMode) -> u32 {
        self(left, right, mode)
    }
}

/// Default strategy: edit-distance ratio of the two display strings, or the
/// token-sorted ratio in token mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSimilarity;

impl<L: Display, R: Display> ScoringStrategy<L, R> for StringSimilarity {
    fn score(&self, left: &L, right: &R, mode: ScoreMode) -> u32 {
        score_strings(&left.to_string(), &right.to_string(), mode)
    }
}

/// Alternative strategy using plain normalized Levenshtein similarity, where a
/// substitution costs the same as an insertion. Stricter than
/// [`StringSimilarity`] on strings of different lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinSimilarity;

impl<L: Display, R: Display> ScoringStrategy<L, R> for LevenshteinSimilarity {
    fn score(&self, left: &L, right: &R, mode: ScoreMode) -> u32 {
        let (a, b) = match mode {
            ScoreMode::Ratio => (left.to_string(), right.to_string()),
            ScoreMode::TokenSort => (
                sort_tokens(&left.to_string()),
                sort_tokens(&right.to_string()),
            ),
        };
        levenshtein_score(&a, &b)
    }
}

/// Score two strings with [`ratio`] or [`token_sort_ratio`] depending on mode.
#[must_use]
pub fn score_strings(a: &str, b: &str, mode: ScoreMode) -> u32 {
    match mode {
        ScoreMode::Ratio => ratio(a, b),
        ScoreMode::TokenSort => token_sort_ratio(a, b),
    }
}

/// Normalized edit-distance similarity in `0..=100`.
///
/// Distance counts insertions and deletions only (a substitution costs two),
/// so the ratio is `2 * lcs / (len(a) + len(b))`, rounded half up.
/// Two empty strings are identical (100).
///
/// ```
/// use item_matcher::matching::scoring::ratio;
///
/// assert_eq!(ratio("John Doe", "John Doe"), 100);
/// assert_eq!(ratio("John Doe", "Jon Doe"), 93);
/// assert_eq!(ratio("abc", "xyz"), 0);
/// ```
#[must_use]
pub fn ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let lcs = longest_common_subsequence(&a, &b);
    // round(100 * 2 * lcs / total) == floor((400 * lcs + total) / (2 * total))
    let rounded = (400 * lcs + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}

/// [`ratio`] after splitting both strings on whitespace and sorting the tokens.
///
/// ```
/// use item_matcher::matching::scoring::token_sort_ratio;
///
/// assert_eq!(token_sort_ratio("Doe John", "John Doe"), 100);
/// ```
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> u32 {
    ratio(&sort_tokens(a), &sort_tokens(b))
}

/// Whitespace tokens, sorted and joined with single spaces.
#[must_use]
pub fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// [`strsim::normalized_levenshtein`] scaled to `0..=100`.
#[must_use]
pub fn levenshtein_score(a: &str, b: &str) -> u32 {
    let similarity = normalized_levenshtein(a, b).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (similarity * 100.0).round() as u32
    }
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
