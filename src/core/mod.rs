//! Core data types for item reconciliation.
//!
//! - [`MatchError`]: precondition violations of matcher and item operations
//! - [`MatchState`]: classification of a pairing record
//! - [`MatchableItem`]: the generic pairing record (left, right, state, score)
//! - [`Matchable`]: how domain records expose their inner pairing record
//! - [`Target`]: capability of left values that may already exist
//! - [`ImportableFile`], [`AudioTarget`], [`Recipient`]: concrete left/right values
//! - [`AudioMatchable`]: content-import record with a derived [`Operation`]
//!
//! [`MatchError`]: error::MatchError
//! [`MatchState`]: state::MatchState
//! [`MatchableItem`]: item::MatchableItem
//! [`Matchable`]: item::Matchable
//! [`Target`]: target::Target
//! [`ImportableFile`]: file::ImportableFile
//! [`AudioTarget`]: target::AudioTarget
//! [`Recipient`]: target::Recipient
//! [`AudioMatchable`]: audio::AudioMatchable
//! [`Operation`]: audio::Operation

pub mod audio;
pub mod error;
pub mod file;
pub mod item;
pub mod state;
pub mod target;
