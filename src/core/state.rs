use serde::{Deserialize, Serialize};

/// Classification of a pairing record.
///
/// Grouping is done through explicit predicates rather than declaration order,
/// so reordering the variants never changes what counts as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// Tombstone: the item's value was absorbed by its partner during a pass.
    /// Always compacted away before the pass returns.
    Unresolved,
    /// Left and right representations are identical
    ExactMatch,
    /// Edit-distance similarity at or above the fuzzy threshold
    FuzzyMatch,
    /// Token-order-insensitive similarity at or above the token threshold
    TokenMatch,
    /// Paired by the user
    ManualMatch,
    /// A left value with no counterpart
    LeftOnly,
    /// A right value with no counterpart
    RightOnly,
}

impl MatchState {
    /// True for every state that pairs a left value with a right value.
    #[must_use]
    pub fn is_match(self) -> bool {
        matches!(
            self,
            Self::ExactMatch | Self::FuzzyMatch | Self::TokenMatch | Self::ManualMatch
        )
    }

    /// True for matches that carry a computed similarity score.
    #[must_use]
    pub fn is_soft_match(self) -> bool {
        matches!(self, Self::FuzzyMatch | Self::TokenMatch)
    }

    /// True for items still waiting for a partner.
    #[must_use]
    pub fn is_unresolved(self) -> bool {
        matches!(self, Self::LeftOnly | Self::RightOnly)
    }

    /// Position of a matched state in the display order: tight matches first,
    /// looser matches lower. Unmatched states share the last slot.
    #[must_use]
    pub fn display_rank(self) -> u8 {
        match self {
            Self::ManualMatch => 0,
            Self::ExactMatch => 1,
            Self::TokenMatch => 2,
            Self::FuzzyMatch => 3,
            Self::LeftOnly | Self::RightOnly | Self::Unresolved => 4,
        }
    }
}

impl MatchState {
    /// Machine-readable name, the same one serde writes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::ExactMatch => "exact_match",
            Self::FuzzyMatch => "fuzzy_match",
            Self::TokenMatch => "token_match",
            Self::ManualMatch => "manual_match",
            Self::LeftOnly => "left_only",
            Self::RightOnly => "right_only",
        }
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => write!(f, "Unresolved"),
            Self::ExactMatch => write!(f, "Exact"),
            Self::FuzzyMatch => write!(f, "Fuzzy"),
            Self::TokenMatch => write!(f, "Token"),
            Self::ManualMatch => write!(f, "Manual"),
            Self::LeftOnly => write!(f, "Left only"),
            Self::RightOnly => write!(f, "Right only"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MatchState; 7] = [
        MatchState::Unresolved,
        MatchState::ExactMatch,
        MatchState::FuzzyMatch,
        MatchState::TokenMatch,
        MatchState::ManualMatch,
        MatchState::LeftOnly,
        MatchState::RightOnly,
    ];

    #[test]
    fn test_predicates_partition_states() {
        for state in ALL {
            // A state is never both matched and unresolved
            assert!(!(state.is_match() && state.is_unresolved()), "{state:?}");
            // Soft matches are matches
            if state.is_soft_match() {
                assert!(state.is_match());
            }
        }
        assert!(!MatchState::Unresolved.is_match());
        assert!(!MatchState::Unresolved.is_unresolved());
        assert!(!MatchState::ExactMatch.is_soft_match());
        assert!(!MatchState::ManualMatch.is_soft_match());
    }

    #[test]
    fn test_display_rank_orders_tight_before_loose() {
        assert!(MatchState::ExactMatch.display_rank() < MatchState::TokenMatch.display_rank());
        assert!(MatchState::TokenMatch.display_rank() < MatchState::FuzzyMatch.display_rank());
        assert!(MatchState::FuzzyMatch.display_rank() < MatchState::LeftOnly.display_rank());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&MatchState::LeftOnly).unwrap();
        assert_eq!(json, "\"left_only\"");
    }

    #[test]
    fn test_as_str_matches_serde_names() {
        for state in ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
    }
}
