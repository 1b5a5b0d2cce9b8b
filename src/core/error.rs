use thiserror::Error;

use crate::core::state::MatchState;
use crate::utils::validation::{ValidationError, MAX_ITEMS};

/// Precondition violations. A rejected operation leaves the matcher unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Duplicates not allowed in left: '{0}'")]
    DuplicateLeft(String),

    #[error("Duplicates not allowed in right: '{0}'")]
    DuplicateRight(String),

    #[error("Too many items: {0} exceeds the maximum of {MAX_ITEMS}")]
    TooManyItems(usize),

    #[error("Index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot match two items of the same side ({0})")]
    SameSide(MatchState),

    #[error("Cannot match {first} with {second}: one must be left only and the other right only")]
    NotMatchable {
        first: MatchState,
        second: MatchState,
    },

    #[error("Item is not matched (state: {0})")]
    NotMatched(MatchState),

    #[error("Factory produced a malformed item: expected {expected}, found {found}")]
    MalformedItem {
        expected: MatchState,
        found: MatchState,
    },

    #[error("Item {0} has no left value")]
    NoTarget(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),
}
