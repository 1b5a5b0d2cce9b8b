use std::path::Path;

use thiserror::Error;

use crate::core::target::Recipient;
use crate::utils::validation::{is_at_item_limit, MAX_ITEMS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Too many items: {0} exceeds the maximum of {MAX_ITEMS}")]
    TooManyItems(usize),
}

/// Parse a file of labels, one per line.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_label_file(path: &Path) -> Result<Vec<String>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_label_text(&content)
}

/// Parse labels, one per line. Blank lines and `#` comments are skipped and
/// surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns `ParseError::TooManyItems` if the limit is exceeded.
pub fn parse_label_text(text: &str) -> Result<Vec<String>, ParseError> {
    let mut labels = Vec::new();
    for line in data_lines(text) {
        if is_at_item_limit(labels.len()) {
            return Err(ParseError::TooManyItems(labels.len() + 1));
        }
        labels.push(line.to_string());
    }
    Ok(labels)
}

/// Parse a recipient table file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_recipient_file(path: &Path) -> Result<Vec<Recipient>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_recipient_text(&content)
}

/// Parse a tab-separated recipient table with columns: community, [group].
///
/// An optional header line starting with `community` is skipped.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has an empty community, or
/// `ParseError::TooManyItems` if the limit is exceeded.
pub fn parse_recipient_text(text: &str) -> Result<Vec<Recipient>, ParseError> {
    let mut recipients = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        // Keep leading tabs: an empty first column is an error, not a shift
        let line = line.trim_end();
        if line.trim_start().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if first_data_line {
            first_data_line = false;
            if fields[0].eq_ignore_ascii_case("community") {
                continue;
            }
        }

        let community = fields[0];
        if community.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has an empty community",
                i + 1
            )));
        }

        let mut recipient = Recipient::new(community);
        if let Some(group) = fields.get(1) {
            recipient = recipient.with_group(*group);
        }

        if is_at_item_limit(recipients.len()) {
            return Err(ParseError::TooManyItems(recipients.len() + 1));
        }
        recipients.push(recipient);
    }

    Ok(recipients)
}

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
