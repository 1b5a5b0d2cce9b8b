use std::cmp::Ordering;
use std::fmt::Display;

use crate::core::error::MatchError;
use crate::core::state::MatchState;
use crate::core::target::Target;

/// A pairing record: an optional left value, an optional right value, and how
/// (or whether) they were matched.
///
/// Shape follows the state:
/// - `LeftOnly`: left present, right absent
/// - `RightOnly`: right present, left absent
/// - any matched state: both present
///
/// `score` is only meaningful for fuzzy and token matches; it is 0 otherwise.
#[derive(Debug, Clone)]
pub struct MatchableItem<L, R> {
    left: Option<L>,
    right: Option<R>,
    state: MatchState,
    score: u32,
}

impl<L, R> MatchableItem<L, R> {
    /// Create an unresolved item. The state is `LeftOnly` when there is no right
    /// value, `RightOnly` otherwise.
    pub fn new(left: Option<L>, right: Option<R>) -> Self {
        debug_assert!(
            left.is_some() != right.is_some(),
            "an unresolved item holds exactly one side"
        );
        let state = if right.is_none() {
            MatchState::LeftOnly
        } else {
            MatchState::RightOnly
        };
        Self {
            left,
            right,
            state,
            score: 0,
        }
    }

    pub fn left_only(left: L) -> Self {
        Self::new(Some(left), None)
    }

    pub fn right_only(right: R) -> Self {
        Self::new(None, Some(right))
    }

    /// Create an item with an explicit state and score.
    pub fn with_state(left: Option<L>, right: Option<R>, state: MatchState, score: u32) -> Self {
        Self {
            left,
            right,
            state,
            score,
        }
    }

    #[must_use]
    pub fn left(&self) -> Option<&L> {
        self.left.as_ref()
    }

    pub fn left_mut(&mut self) -> Option<&mut L> {
        self.left.as_mut()
    }

    #[must_use]
    pub fn right(&self) -> Option<&R> {
        self.right.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True when the sides present agree with the state. Tombstones are never
    /// well formed.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self.state {
            MatchState::LeftOnly => self.left.is_some() && self.right.is_none(),
            MatchState::RightOnly => self.left.is_none() && self.right.is_some(),
            MatchState::Unresolved => false,
            _ => self.left.is_some() && self.right.is_some(),
        }
    }

    /// Undo a match.
    ///
    /// This is deliberately asymmetric: `self` keeps the left value and becomes
    /// `LeftOnly` in place (so any index the caller holds still points at the
    /// left value), while the right value is handed back in a new `RightOnly`
    /// item for the caller to reinsert.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NotMatched` if the item is not in a matched state.
    pub fn disassociate(&mut self) -> Result<Self, MatchError> {
        if !self.state.is_match() {
            return Err(MatchError::NotMatched(self.state));
        }
        let right = self.right.take().ok_or(MatchError::NotMatched(self.state))?;
        self.state = MatchState::LeftOnly;
        self.score = 0;
        Ok(Self::right_only(right))
    }

    /// Take the right value of a partner and become a match.
    pub(crate) fn absorb(&mut self, right: R, state: MatchState, score: u32) {
        self.right = Some(right);
        self.state = state;
        self.score = score;
    }

    /// Surrender the right value and become a tombstone.
    pub(crate) fn tombstone(&mut self) -> Option<R> {
        self.state = MatchState::Unresolved;
        self.score = 0;
        self.right.take()
    }
}

impl<L: Target, R> MatchableItem<L, R> {
    /// A matched item whose left value may be imported without an unwanted
    /// overwrite.
    #[must_use]
    pub fn is_importable(&self) -> bool {
        self.state.is_match() && self.left.as_ref().is_some_and(|l| l.is_importable())
    }
}

impl<L: Display, R: Display> MatchableItem<L, R> {
    /// String representation used for ordering and exact matching: the present
    /// side of an unresolved item, empty for anything else.
    #[must_use]
    pub fn representation(&self) -> String {
        match self.state {
            MatchState::LeftOnly => self.left.as_ref().map(ToString::to_string),
            MatchState::RightOnly => self.right.as_ref().map(ToString::to_string),
            _ => None,
        }
        .unwrap_or_default()
    }

    /// Key for the seeding order. Equal representations sort adjacent, with the
    /// right-only item after the other.
    #[must_use]
    pub fn sort_key(&self) -> (String, bool) {
        (self.representation(), self.state == MatchState::RightOnly)
    }

    /// Natural ordering of two items: by representation, then right-only last.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    /// Short status text, e.g. "Exact" or "Fuzzy @93".
    #[must_use]
    pub fn status_label(&self) -> String {
        if self.state.is_soft_match() {
            format!("{} @{}", self.state, self.score)
        } else if self.state == MatchState::Unresolved {
            String::new()
        } else {
            self.state.to_string()
        }
    }

    /// Case-insensitive substring search over both sides.
    #[must_use]
    pub fn contains_text(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.left
            .as_ref()
            .is_some_and(|l| l.to_string().to_lowercase().contains(&filter))
            || self
                .right
                .as_ref()
                .is_some_and(|r| r.to_string().to_lowercase().contains(&filter))
    }
}

/// Equality covers left, right and state. Score is ignored.
impl<L: PartialEq, R: PartialEq> PartialEq for MatchableItem<L, R> {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right && self.state == other.state
    }
}

impl<L: Eq, R: Eq> Eq for MatchableItem<L, R> {}

/// A domain record built around a [`MatchableItem`].
///
/// Domains add derived fields (an operation label, say) by wrapping the
/// generic record instead of subclassing it. The matcher only ever touches the
/// inner item.
pub trait Matchable {
    type Left;
    type Right;

    fn item(&self) -> &MatchableItem<Self::Left, Self::Right>;

    fn item_mut(&mut self) -> &mut MatchableItem<Self::Left, Self::Right>;

    /// Wrap a bare item, e.g. the right-only remainder of an undone match.
    fn from_item(item: MatchableItem<Self::Left, Self::Right>) -> Self;

    /// Prefix for left values in descriptions.
    fn left_label() -> &'static str {
        "Left"
    }

    /// Prefix for right values in descriptions.
    fn right_label() -> &'static str {
        "Right"
    }

    /// Human-readable description, prefixed with the domain's side labels.
    fn description(&self) -> String
    where
        Self::Left: Display,
        Self::Right: Display,
    {
        let item = self.item();
        match (item.left(), item.right()) {
            (Some(l), Some(r)) => format!(
                "{} {}: {} <-> {}: {}",
                item.state(),
                Self::left_label(),
                l,
                Self::right_label(),
                r
            ),
            (Some(l), None) => format!("{}: {}", Self::left_label(), l),
            (None, Some(r)) => format!("{}: {}", Self::right_label(), r),
            (None, None) => String::new(),
        }
    }
}

impl<L, R> Matchable for MatchableItem<L, R> {
    type Left = L;
    type Right = R;

    fn item(&self) -> &MatchableItem<L, R> {
        self
    }

    fn item_mut(&mut self) -> &mut MatchableItem<L, R> {
        self
    }

    fn from_item(item: MatchableItem<L, R>) -> Self {
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::AudioTarget;

    type Item = MatchableItem<String, String>;

    #[test]
    fn test_new_defaults_state_from_sides() {
        let left = Item::new(Some("a".to_string()), None);
        assert_eq!(left.state(), MatchState::LeftOnly);
        let right = Item::new(None, Some("a".to_string()));
        assert_eq!(right.state(), MatchState::RightOnly);
        assert_eq!(right.score(), 0);
    }

    #[test]
    fn test_equality_ignores_score() {
        let a = Item::with_state(
            Some("x".into()),
            Some("y".into()),
            MatchState::FuzzyMatch,
            91,
        );
        let b = Item::with_state(
            Some("x".into()),
            Some("y".into()),
            MatchState::FuzzyMatch,
            85,
        );
        let c = Item::with_state(
            Some("x".into()),
            Some("y".into()),
            MatchState::TokenMatch,
            91,
        );
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_compare_puts_right_only_after_equal_left() {
        let left = Item::left_only("Alice".into());
        let right = Item::right_only("Alice".into());
        assert_eq!(left.compare(&right), Ordering::Less);
        assert_eq!(right.compare(&left), Ordering::Greater);

        let bob = Item::left_only("Bob".into());
        assert_eq!(right.compare(&bob), Ordering::Less);
    }

    #[test]
    fn test_matched_items_have_empty_representation() {
        let item = Item::with_state(
            Some("x".into()),
            Some("y".into()),
            MatchState::ExactMatch,
            0,
        );
        assert_eq!(item.representation(), "");
    }

    #[test]
    fn test_disassociate_splits_in_place() {
        let mut item = Item::with_state(
            Some("John Doe".into()),
            Some("Jon Doe".into()),
            MatchState::FuzzyMatch,
            93,
        );
        let remainder = item.disassociate().unwrap();

        assert_eq!(item.state(), MatchState::LeftOnly);
        assert_eq!(item.left().map(String::as_str), Some("John Doe"));
        assert!(item.right().is_none());
        assert_eq!(item.score(), 0);

        assert_eq!(remainder.state(), MatchState::RightOnly);
        assert_eq!(remainder.right().map(String::as_str), Some("Jon Doe"));
        assert!(remainder.left().is_none());
    }

    #[test]
    fn test_well_formed_follows_state() {
        let a = || Some("a".to_string());
        assert!(Item::left_only("a".to_string()).is_well_formed());
        assert!(Item::right_only("a".to_string()).is_well_formed());
        assert!(Item::with_state(a(), a(), MatchState::FuzzyMatch, 91).is_well_formed());

        assert!(!Item::with_state(a(), a(), MatchState::RightOnly, 0).is_well_formed());
        assert!(!Item::with_state(a(), None, MatchState::RightOnly, 0).is_well_formed());
        assert!(!Item::with_state(None, a(), MatchState::ExactMatch, 0).is_well_formed());
        assert!(!Item::with_state(None, None, MatchState::Unresolved, 0).is_well_formed());
    }

    #[test]
    fn test_importable_needs_match_and_consent() {
        let file = || Some("Health.mp3".to_string());
        let free = || Some(AudioTarget::new("Health"));
        let taken = || Some(AudioTarget::new("Health").with_existing_item("audio-17"));

        let matched = MatchableItem::with_state(free(), file(), MatchState::ExactMatch, 0);
        assert!(matched.is_importable());
        let unmatched: MatchableItem<AudioTarget, String> =
            MatchableItem::left_only(AudioTarget::new("Health"));
        assert!(!unmatched.is_importable());
        let existing = MatchableItem::with_state(taken(), file(), MatchState::ExactMatch, 0);
        assert!(!existing.is_importable());

        let mut consented = existing.clone();
        if let Some(target) = consented.left_mut() {
            target.set_replace_ok(true);
        }
        assert!(consented.is_importable());
    }

    #[test]
    fn test_disassociate_rejects_unmatched() {
        let mut item = Item::left_only("a".into());
        assert_eq!(
            item.disassociate(),
            Err(MatchError::NotMatched(MatchState::LeftOnly))
        );
        assert_eq!(item.state(), MatchState::LeftOnly);
    }

    #[test]
    fn test_status_label() {
        let fuzzy = Item::with_state(Some("a".into()), Some("b".into()), MatchState::FuzzyMatch, 93);
        assert_eq!(fuzzy.status_label(), "Fuzzy @93");
        let exact = Item::with_state(Some("a".into()), Some("a".into()), MatchState::ExactMatch, 0);
        assert_eq!(exact.status_label(), "Exact");
        assert_eq!(Item::left_only("a".into()).status_label(), "Left only");
    }

    #[test]
    fn test_contains_text_is_case_insensitive() {
        let item = Item::with_state(
            Some("Health Message".into()),
            Some("health_01".into()),
            MatchState::FuzzyMatch,
            70,
        );
        assert!(item.contains_text("MESSAGE"));
        assert!(item.contains_text("_01"));
        assert!(!item.contains_text("farming"));
    }

    #[test]
    fn test_description_uses_side_labels() {
        let left = Item::left_only("Alice".into());
        assert_eq!(left.description(), "Left: Alice");
        let matched = Item::with_state(Some("a".into()), Some("b".into()), MatchState::ManualMatch, 0);
        assert_eq!(matched.description(), "Manual Left: a <-> Right: b");
    }
}
