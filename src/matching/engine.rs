use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use crate::core::error::MatchError;
use crate::core::item::{Matchable, MatchableItem};
use crate::core::state::MatchState;
use crate::core::target::Target;
use crate::matching::scoring::{ScoreMode, ScoringStrategy, StringSimilarity};
use crate::matching::stats::MatchStats;
use crate::utils::validation::{find_duplicate, validate_threshold, ValidationError, MAX_ITEMS};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Default similarity threshold for the fuzzy and token passes
pub const DEFAULT_THRESHOLD: u32 = 80;

/// Lowest threshold a configuration may ask for
pub const MINIMUM_THRESHOLD: u32 = 60;

/// Which passes [`Matcher::auto_match`] runs, and at what thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Run the exact pass
    pub exact: bool,
    /// Run the fuzzy pass
    pub fuzzy: bool,
    /// Run the token pass
    pub token: bool,
    pub fuzzy_threshold: u32,
    pub token_threshold: u32,
    /// Floor for both thresholds
    pub minimum_threshold: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            exact: true,
            fuzzy: true,
            token: true,
            fuzzy_threshold: DEFAULT_THRESHOLD,
            token_threshold: DEFAULT_THRESHOLD,
            minimum_threshold: MINIMUM_THRESHOLD,
        }
    }
}

impl MatchingConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or holds an
    /// invalid threshold.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the thresholds of the enabled passes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a threshold above 100 or below the minimum.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fuzzy {
            validate_threshold(self.fuzzy_threshold, self.minimum_threshold)?;
        }
        if self.token {
            validate_threshold(self.token_threshold, self.minimum_threshold)?;
        }
        Ok(())
    }
}

/// Reconciles a left collection against a right collection.
///
/// The matcher owns one flat list holding matched pairs, left-only items and
/// right-only items. Passes rewrite that list in place; callers read it
/// between passes and address items by index. Any index obtained before a pass
/// or a manual operation is stale afterwards.
///
/// Matching is greedy: the fuzzy and token passes commit to the highest
/// scoring available pair first and never revisit it. That is not a maximum
/// weight assignment and is not meant to be one.
#[derive(Debug, Clone)]
pub struct Matcher<T, S = StringSimilarity> {
    items: Vec<T>,
    scorer: S,
}

impl<T: Matchable> Matcher<T, StringSimilarity> {
    /// Create an empty matcher with the default string similarity.
    pub fn new() -> Self {
        Self::with_scorer(StringSimilarity)
    }
}

impl<T: Matchable> Default for Matcher<T, StringSimilarity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Matchable, S> Matcher<T, S> {
    /// Create an empty matcher with a custom scoring strategy.
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            items: Vec::new(),
            scorer,
        }
    }

    /// Current items, in working order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.items
            .iter()
            .filter(|t| t.item().state().is_match())
            .count()
    }

    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.items
            .iter()
            .filter(|t| t.item().state().is_unresolved())
            .count()
    }
}

impl<T, S> Matcher<T, S>
where
    T: Matchable,
    T::Left: Display,
    T::Right: Display,
{
    /// Replace the working list with one left-only item per left value and one
    /// right-only item per right value, sorted so that equal representations
    /// are adjacent with the left item first.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::DuplicateLeft`/`DuplicateRight` if either
    /// collection repeats a value, `MatchError::TooManyItems` if either side
    /// exceeds [`MAX_ITEMS`], or `MatchError::MalformedItem` if the factory
    /// returns anything but a well-formed left-only (right-only) item for a
    /// left (right) value. The previous list is kept on error.
    pub fn seed<F>(
        &mut self,
        left: impl IntoIterator<Item = T::Left>,
        right: impl IntoIterator<Item = T::Right>,
        mut factory: F,
    ) -> Result<(), MatchError>
    where
        F: FnMut(Option<T::Left>, Option<T::Right>) -> T,
        T::Left: Eq + Hash,
        T::Right: Eq + Hash,
    {
        let left: Vec<T::Left> = left.into_iter().collect();
        let right: Vec<T::Right> = right.into_iter().collect();

        for count in [left.len(), right.len()] {
            if count > MAX_ITEMS {
                return Err(MatchError::TooManyItems(count));
            }
        }
        if let Some(dup) = find_duplicate(&left) {
            return Err(MatchError::DuplicateLeft(dup.to_string()));
        }
        if let Some(dup) = find_duplicate(&right) {
            return Err(MatchError::DuplicateRight(dup.to_string()));
        }

        let (left_count, right_count) = (left.len(), right.len());
        let mut items = Vec::with_capacity(left_count + right_count);
        for l in left {
            items.push(check_seeded(factory(Some(l), None), MatchState::LeftOnly)?);
        }
        for r in right {
            items.push(check_seeded(factory(None, Some(r)), MatchState::RightOnly)?);
        }
        items.sort_by_cached_key(|t| t.item().sort_key());
        self.items = items;

        debug!(left = left_count, right = right_count, "Seeded matcher");
        Ok(())
    }

    /// Pair left and right items whose representations are identical.
    ///
    /// Unresolved items are visited in seeding order, where a left item can
    /// only ever equal the right item directly after it, so one linear scan
    /// suffices. The working list itself is not reordered, so an undo that
    /// left the list out of seeding order does not hide a pair.
    pub fn find_exact_matches(&mut self) -> MatchStats {
        let mut stats = MatchStats::new();
        let mut order: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, t)| t.item().state().is_unresolved())
            .map(|(i, _)| i)
            .collect();
        order.sort_by_cached_key(|&i| self.items[i].item().sort_key());

        let mut k = 0;
        while k + 1 < order.len() {
            let (ix, next) = (order[k], order[k + 1]);
            let first = self.items[ix].item();
            let second = self.items[next].item();
            if first.state() == MatchState::LeftOnly && second.state() == MatchState::RightOnly {
                stats.comparisons += 1;
                if first.representation() == second.representation() {
                    self.record_match(ix, next, MatchState::ExactMatch, 0);
                    stats.matches += 1;
                }
                k += 2;
            } else {
                // The next item may still pair with its own successor
                k += 1;
            }
        }

        self.squash();
        info!(%stats, "Exact pass");
        stats
    }

    /// Pair a left-only item with a right-only item by hand.
    ///
    /// The arguments may be given in either order. The new match has state
    /// `ManualMatch` and score 0. Indices shift afterwards because the
    /// right-only item is removed.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::IndexOutOfRange` for a bad index, `SameSide` for two
    /// left-only or two right-only items, and `NotMatchable` if either item is
    /// already matched.
    pub fn set_match(&mut self, a: usize, b: usize) -> Result<(), MatchError> {
        let first = self.state_at(a)?;
        let second = self.state_at(b)?;
        let (left_ix, right_ix) = match (first, second) {
            (MatchState::LeftOnly, MatchState::RightOnly) => (a, b),
            (MatchState::RightOnly, MatchState::LeftOnly) => (b, a),
            (x, y) if x == y && x.is_unresolved() => return Err(MatchError::SameSide(x)),
            (x, y) => {
                return Err(MatchError::NotMatchable {
                    first: x,
                    second: y,
                })
            }
        };

        self.record_match(left_ix, right_ix, MatchState::ManualMatch, 0);
        self.squash();
        Ok(())
    }

    /// Undo the match at `index`.
    ///
    /// The item at `index` keeps the left value and becomes left-only; the
    /// right value comes back as a new right-only item inserted right after
    /// it, so the two halves stay adjacent.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::IndexOutOfRange` for a bad index or
    /// `MatchError::NotMatched` if the item is not matched.
    pub fn un_match(&mut self, index: usize) -> Result<(), MatchError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(MatchError::IndexOutOfRange { index, len })?
            .item_mut();
        let remainder = item.disassociate()?;
        debug!(
            right = %remainder.right().map(ToString::to_string).unwrap_or_default(),
            "Undid match"
        );
        self.items.insert(index + 1, T::from_item(remainder));
        Ok(())
    }

    /// True if the two items could be matched by hand: one left-only and the
    /// other right-only.
    #[must_use]
    pub fn are_matchable(a: &T, b: &T) -> bool {
        matches!(
            (a.item().state(), b.item().state()),
            (MatchState::LeftOnly, MatchState::RightOnly)
                | (MatchState::RightOnly, MatchState::LeftOnly)
        )
    }

    /// [`Matcher::are_matchable`] by index. Out-of-range indices are never
    /// matchable.
    #[must_use]
    pub fn are_matchable_at(&self, a: usize, b: usize) -> bool {
        match (self.items.get(a), self.items.get(b)) {
            (Some(a), Some(b)) => Self::are_matchable(a, b),
            _ => false,
        }
    }

    /// Order items for display: matched items first, tight matches (manual,
    /// exact) before token before fuzzy, then unresolved items by
    /// representation. Matched items of the same kind fall back to the left
    /// value's text.
    pub fn sort(&mut self) {
        self.items.sort_by_cached_key(|t| display_key(t.item()));
    }

    /// Undo every match and restore the seeding order.
    pub fn reset(&mut self) {
        let mut remainders = Vec::new();
        for t in &mut self.items {
            if t.item().state().is_match() {
                if let Ok(remainder) = t.item_mut().disassociate() {
                    remainders.push(T::from_item(remainder));
                }
            }
        }
        let undone = remainders.len();
        self.items.extend(remainders);
        self.squash();
        self.items.sort_by_cached_key(|t| t.item().sort_key());
        debug!(undone, "Reset matcher");
    }

    /// Undo every fuzzy or token match scoring below `threshold`. Returns how
    /// many matches were undone.
    pub fn tighten_threshold(&mut self, threshold: u32) -> usize {
        let mut undone = 0;
        let mut ix = 0;
        while ix < self.items.len() {
            let item = self.items[ix].item();
            if item.state().is_soft_match() && item.score() < threshold && self.un_match(ix).is_ok()
            {
                undone += 1;
                // Skip the right-only remainder just inserted
                ix += 2;
            } else {
                ix += 1;
            }
        }
        debug!(threshold, undone, "Tightened threshold");
        undone
    }

    /// Items whose left or right text contains `text`, ignoring case.
    pub fn filtered<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a T> + 'a {
        self.items
            .iter()
            .filter(move |t| t.item().contains_text(text))
    }

    /// Index of the item holding `value` on its left side.
    pub fn find_left(&self, value: &T::Left) -> Option<usize>
    where
        T::Left: PartialEq,
    {
        self.items
            .iter()
            .position(|t| t.item().left() == Some(value))
    }

    /// Index of the item holding `value` on its right side.
    pub fn find_right(&self, value: &T::Right) -> Option<usize>
    where
        T::Right: PartialEq,
    {
        self.items
            .iter()
            .position(|t| t.item().right() == Some(value))
    }

    fn state_at(&self, index: usize) -> Result<MatchState, MatchError> {
        self.items
            .get(index)
            .map(|t| t.item().state())
            .ok_or(MatchError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// Move the right value of `right_ix` into `left_ix` and tombstone the
    /// right item. The only path by which matches are made.
    fn record_match(&mut self, left_ix: usize, right_ix: usize, state: MatchState, score: u32) {
        let Some(right) = self.items[right_ix].item_mut().tombstone() else {
            return;
        };
        let left = self.items[left_ix].item_mut();
        debug!(
            left = %left.left().map(ToString::to_string).unwrap_or_default(),
            right = %right,
            state = %state,
            score,
            "Matched"
        );
        left.absorb(right, state, score);
    }

    /// Drop tombstoned items.
    fn squash(&mut self) {
        self.items
            .retain(|t| t.item().state() != MatchState::Unresolved);
    }
}

impl<T, S> Matcher<T, S>
where
    T: Matchable,
    T::Left: Display,
    T::Right: Display,
    S: ScoringStrategy<T::Left, T::Right>,
{
    /// Greedy pass over the edit-distance ratio. Pairs scoring at least
    /// `threshold` become `FuzzyMatch`.
    pub fn find_fuzzy_matches(&mut self, threshold: u32) -> MatchStats {
        let stats = self.matrix_match(threshold, ScoreMode::Ratio);
        self.squash();
        info!(%stats, threshold, "Fuzzy pass");
        stats
    }

    /// Greedy pass over the token-sorted ratio. Pairs scoring at least
    /// `threshold` become `TokenMatch`.
    pub fn find_token_matches(&mut self, threshold: u32) -> MatchStats {
        let stats = self.matrix_match(threshold, ScoreMode::TokenSort);
        self.squash();
        info!(%stats, threshold, "Token pass");
        stats
    }

    /// Run the enabled passes in order (exact, fuzzy, token), then sort for
    /// display.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidConfig` if a threshold is out of range; no
    /// pass runs in that case.
    pub fn auto_match(&mut self, config: &MatchingConfig) -> Result<MatchStats, MatchError> {
        config.validate()?;

        let mut stats = MatchStats::new();
        if config.exact {
            stats.add(&self.find_exact_matches());
        }
        if config.fuzzy {
            stats.add(&self.find_fuzzy_matches(config.fuzzy_threshold));
        }
        if config.token {
            stats.add(&self.find_token_matches(config.token_threshold));
        }
        self.sort();

        info!(%stats, matched = self.matched_count(), unresolved = self.unresolved_count(), "Auto-match complete");
        Ok(stats)
    }

    /// Score every left-only item against every right-only item, then walk the
    /// pairs from best to worst, taking each pair whose two items are both
    /// still free.
    fn matrix_match(&mut self, threshold: u32, mode: ScoreMode) -> MatchStats {
        let mut stats = MatchStats::new();
        let lefts = self.indices_in(MatchState::LeftOnly);
        let rights = self.indices_in(MatchState::RightOnly);
        if lefts.is_empty() || rights.is_empty() {
            debug!(
                lefts = lefts.len(),
                rights = rights.len(),
                "Nothing to match"
            );
            return stats;
        }

        let mut scored: Vec<(usize, usize, u32)> = Vec::with_capacity(lefts.len() * rights.len());
        for &li in &lefts {
            let Some(left) = self.items[li].item().left() else {
                continue;
            };
            for &ri in &rights {
                let Some(right) = self.items[ri].item().right() else {
                    continue;
                };
                stats.comparisons += 1;
                let score = self.scorer.score(left, right, mode).min(100);
                scored.push((li, ri, score));
            }
        }

        // Stable, so equal scores keep working-list order
        scored.sort_by(|a, b| b.2.cmp(&a.2));

        let state = match mode {
            ScoreMode::Ratio => MatchState::FuzzyMatch,
            ScoreMode::TokenSort => MatchState::TokenMatch,
        };
        for (li, ri, score) in scored {
            if score < threshold {
                break;
            }
            if self.items[li].item().state() == MatchState::LeftOnly
                && self.items[ri].item().state() == MatchState::RightOnly
            {
                self.record_match(li, ri, state, score);
                stats.matches += 1;
            }
        }
        stats
    }

    fn indices_in(&self, state: MatchState) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, t)| t.item().state() == state)
            .map(|(i, _)| i)
            .collect()
    }
}

impl<T, S> Matcher<T, S>
where
    T: Matchable,
    T::Left: Display + Target,
    T::Right: Display,
{
    /// Matched items whose left value may be imported without an unwanted
    /// overwrite.
    pub fn importable(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter(|t| t.item().is_importable())
    }

    /// Record the user's consent (or refusal) to overwrite the existing target
    /// of the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::IndexOutOfRange` for a bad index, or
    /// `MatchError::NoTarget` if the item has no left value.
    pub fn set_replace_ok(&mut self, index: usize, replace_ok: bool) -> Result<(), MatchError> {
        let len = self.items.len();
        let target = self
            .items
            .get_mut(index)
            .ok_or(MatchError::IndexOutOfRange { index, len })?
            .item_mut()
            .left_mut()
            .ok_or(MatchError::NoTarget(index))?;
        target.set_replace_ok(replace_ok);
        Ok(())
    }
}

/// Accept a factory-built item only if it has the expected unresolved state and
/// the shape that state requires.
fn check_seeded<T: Matchable>(seeded: T, expected: MatchState) -> Result<T, MatchError> {
    let item = seeded.item();
    if item.state() == expected && item.is_well_formed() {
        Ok(seeded)
    } else {
        Err(MatchError::MalformedItem {
            expected,
            found: item.state(),
        })
    }
}

fn display_key<L: Display, R: Display>(item: &MatchableItem<L, R>) -> (bool, u8, String, bool) {
    let state = item.state();
    if state.is_match() {
        let left = item.left().map(ToString::to_string).unwrap_or_default();
        (false, state.display_rank(), left, false)
    } else {
        (
            true,
            state.display_rank(),
            item.representation(),
            state == MatchState::RightOnly,
        )
    }
}
