use serde::{Deserialize, Serialize};

use crate::core::file::ImportableFile;
use crate::core::item::{Matchable, MatchableItem};
use crate::core::state::MatchState;
use crate::core::target::{AudioTarget, Target};

/// What importing a row would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Matched, nothing there yet
    Import,
    /// Matched, existing audio will be replaced
    Update,
    /// Existing audio stays as it is
    Keep,
    /// No audio, and no file to supply it
    Missing,
    /// A file nothing asked for
    Extra,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Import => write!(f, "Import"),
            Self::Update => write!(f, "Update"),
            Self::Keep => write!(f, "Keep"),
            Self::Missing => write!(f, "Missing"),
            Self::Extra => write!(f, "Extra"),
        }
    }
}

/// Content-import row: an audio slot paired with a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioMatchable {
    item: MatchableItem<AudioTarget, ImportableFile>,
}

impl AudioMatchable {
    /// Factory for seeding a matcher.
    pub fn new(left: Option<AudioTarget>, right: Option<ImportableFile>) -> Self {
        Self {
            item: MatchableItem::new(left, right),
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        let state = self.item.state();
        let target = self.item.left();
        if state.is_match() {
            match target {
                Some(t) if t.target_exists() && t.is_replace_ok() => Operation::Update,
                Some(t) if t.target_exists() => Operation::Keep,
                _ => Operation::Import,
            }
        } else if state == MatchState::LeftOnly {
            if target.is_some_and(Target::target_exists) {
                Operation::Keep
            } else {
                Operation::Missing
            }
        } else {
            Operation::Extra
        }
    }
}

impl Matchable for AudioMatchable {
    type Left = AudioTarget;
    type Right = ImportableFile;

    fn item(&self) -> &MatchableItem<AudioTarget, ImportableFile> {
        &self.item
    }

    fn item_mut(&mut self) -> &mut MatchableItem<AudioTarget, ImportableFile> {
        &mut self.item
    }

    fn from_item(item: MatchableItem<AudioTarget, ImportableFile>) -> Self {
        Self { item }
    }

    fn left_label() -> &'static str {
        "Audio"
    }

    fn right_label() -> &'static str {
        "File"
    }
}
