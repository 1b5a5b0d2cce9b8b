//! Reconciliation engine and scoring.
//!
//! - [`Matcher`]: owns the working list and runs the matching passes
//! - [`ScoringStrategy`]: pluggable similarity used by the fuzzy and token passes
//! - [`MatchStats`]: comparison and match counts for status reporting
//!
//! ## Passes
//!
//! 1. **Exact**: a left and a right with identical text. One linear scan over
//!    the seeding order, where such pairs are adjacent.
//! 2. **Fuzzy**: every remaining left scored against every remaining right by
//!    edit-distance ratio, then assigned greedily from the best score down.
//! 3. **Token**: as fuzzy, but with word order ignored.
//!
//! Manual matching and undo work on indices into [`Matcher::items`].
//!
//! ## Example
//!
//! ```rust
//! use item_matcher::core::item::MatchableItem;
//! use item_matcher::core::state::MatchState;
//! use item_matcher::matching::{Matcher, MatchingConfig};
//!
//! let mut matcher: Matcher<MatchableItem<String, String>> = Matcher::new();
//! matcher
//!     .seed(
//!         vec!["John Doe".to_string(), "Mary Major".to_string()],
//!         vec!["Jon Doe".to_string(), "Mary Major".to_string()],
//!         MatchableItem::new,
//!     )
//!     .unwrap();
//!
//! matcher.auto_match(&MatchingConfig::default()).unwrap();
//!
//! assert_eq!(matcher.items()[0].state(), MatchState::ExactMatch);
//! assert_eq!(matcher.items()[1].state(), MatchState::FuzzyMatch);
//! assert_eq!(matcher.items()[1].score(), 93);
//! ```

pub mod engine;
pub mod recipient;
pub mod scoring;
pub mod stats;

pub use engine::{MatchError, Matcher, MatchingConfig};
pub use scoring::{ScoreMode, ScoringStrategy, StringSimilarity};
pub use stats::MatchStats;
