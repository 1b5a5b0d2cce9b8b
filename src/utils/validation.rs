//! Centralized validation and helper functions.

use std::collections::HashSet;
use std::hash::Hash;

/// Maximum number of items on one side of a reconciliation.
///
/// Passes score every left against every right, so this bounds the matrix.
pub const MAX_ITEMS: usize = 10_000;

/// Highest possible similarity score.
pub const MAX_SCORE: u32 = 100;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Threshold {0} is out of range: must be between 0 and {MAX_SCORE}")]
    ThresholdOutOfRange(u32),
    #[error("Threshold {threshold} is below the minimum of {minimum}")]
    ThresholdBelowMinimum { threshold: u32, minimum: u32 },
}

/// Validate a similarity threshold against `minimum..=100`.
///
/// # Examples
///
/// ```
/// use item_matcher::utils::validation::validate_threshold;
///
/// assert!(validate_threshold(80, 60).is_ok());
/// assert!(validate_threshold(101, 60).is_err());
/// assert!(validate_threshold(40, 60).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::ThresholdOutOfRange` above 100, or
/// `ValidationError::ThresholdBelowMinimum` below `minimum`.
pub fn validate_threshold(threshold: u32, minimum: u32) -> Result<u32, ValidationError> {
    if threshold > MAX_SCORE {
        return Err(ValidationError::ThresholdOutOfRange(threshold));
    }
    if threshold < minimum {
        return Err(ValidationError::ThresholdBelowMinimum { threshold, minimum });
    }
    Ok(threshold)
}

/// True when a collection already holding `count` items has no room for
/// another. Call it before adding.
#[must_use]
pub fn is_at_item_limit(count: usize) -> bool {
    count >= MAX_ITEMS
}

/// First value that occurs more than once, if any.
pub fn find_duplicate<V: Eq + Hash>(values: &[V]) -> Option<&V> {
    let mut seen: HashSet<&V> = HashSet::with_capacity(values.len());
    values.iter().find(|v| !seen.insert(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_threshold() {
        assert_eq!(validate_threshold(0, 0), Ok(0));
        assert_eq!(validate_threshold(100, 60), Ok(100));
        assert_eq!(
            validate_threshold(101, 0),
            Err(ValidationError::ThresholdOutOfRange(101))
        );
        assert_eq!(
            validate_threshold(59, 60),
            Err(ValidationError::ThresholdBelowMinimum {
                threshold: 59,
                minimum: 60
            })
        );
    }

    #[test]
    fn test_is_at_item_limit() {
        assert!(!is_at_item_limit(0));
        assert!(!is_at_item_limit(MAX_ITEMS - 1));
        assert!(is_at_item_limit(MAX_ITEMS));
    }

    #[test]
    fn test_find_duplicate() {
        assert_eq!(find_duplicate(&["a", "b", "c"]), None);
        assert_eq!(find_duplicate(&["a", "b", "a", "b"]), Some(&"a"));
        let empty: [String; 0] = [];
        assert_eq!(find_duplicate(&empty), None);
    }
}
