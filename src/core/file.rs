use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A candidate file discovered for import.
///
/// Its representation is the title, by default the file name with the
/// extension stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportableFile {
    pub path: PathBuf,
    pub title: String,
}

impl ImportableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = title_from_path(&path);
        Self { path, title }
    }

    /// A file whose title is known independently of its name.
    pub fn with_title(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }

    /// Extension of the file, lowercased.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

impl std::fmt::Display for ImportableFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
