use std::path::Path;

use tracing::debug;

use crate::core::file::ImportableFile;
use crate::parsing::list::ParseError;
use crate::utils::validation::is_at_item_limit;

/// List the candidate files in a directory, sorted by path.
///
/// Subdirectories and hidden files are skipped. When `extensions` is given,
/// only files with one of those extensions (compared case-insensitively) are
/// kept.
///
/// # Errors
///
/// Returns `ParseError::Io` if the directory cannot be read, or
/// `ParseError::TooManyItems` if the limit is exceeded.
pub fn list_directory(
    dir: &Path,
    extensions: Option<&[&str]>,
) -> Result<Vec<ImportableFile>, ParseError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let file = ImportableFile::new(entry.path());
        if let Some(allowed) = extensions {
            let keep = file
                .extension()
                .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)));
            if !keep {
                continue;
            }
        }

        if is_at_item_limit(files.len()) {
            return Err(ParseError::TooManyItems(files.len() + 1));
        }
        files.push(file);
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(dir = %dir.display(), count = files.len(), "Listed candidate files");
    Ok(files)
}
