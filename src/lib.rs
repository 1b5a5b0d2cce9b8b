//! # item-matcher
//!
//! A library for reconciling two collections of named items: the things you
//! expect (content slots, recipients) and the things you found (files on disk).
//!
//! Names rarely line up exactly. A recording of "John Doe" may be saved as
//! `Jon Doe.mp3`, a greeting for the women's group of Jirapa as
//! `Women - Jirapa.wav`. `item-matcher` pairs them with a cascade of passes and
//! leaves the rest for manual correction.
//!
//! ## Features
//!
//! - **Exact matching**: identical names, found in one linear scan
//! - **Fuzzy matching**: edit-distance similarity above a threshold
//! - **Token matching**: similarity with word order ignored
//! - **Greedy assignment**: best score first, each item used at most once
//! - **Manual correction**: match, undo and reset by index
//! - **Pluggable scoring**: any [`ScoringStrategy`], closures included
//!
//! ## Example
//!
//! ```rust
//! use item_matcher::{AudioMatchable, AudioTarget, ImportableFile, Matcher, MatchingConfig, Operation};
//!
//! let mut matcher: Matcher<AudioMatchable> = Matcher::new();
//! matcher
//!     .seed(
//!         vec![AudioTarget::new("Health tips"), AudioTarget::new("Farming")],
//!         vec![ImportableFile::new("health tips.mp3"), ImportableFile::new("Farming.mp3")],
//!         AudioMatchable::new,
//!     )
//!     .unwrap();
//!
//! let stats = matcher.auto_match(&MatchingConfig::default()).unwrap();
//! assert_eq!(stats.matches, 2);
//!
//! for row in matcher.items() {
//!     assert_eq!(row.operation(), Operation::Import);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Match states, the pairing record, and domain values
//! - [`matching`]: Matching engine and scoring algorithms
//! - [`parsing`]: Readers for label lists, recipient tables and directories
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::audio::{AudioMatchable, Operation};
pub use core::file::ImportableFile;
pub use core::item::{Matchable, MatchableItem};
pub use core::state::MatchState;
pub use core::target::{AudioTarget, Recipient, Target};
pub use matching::engine::{MatchError, Matcher, MatchingConfig};
pub use matching::scoring::{ScoreMode, ScoringStrategy, StringSimilarity};
pub use matching::stats::MatchStats;
