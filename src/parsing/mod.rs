//! Readers for the two sides of a reconciliation.
//!
//! - **Label lists**: one label per line, `#` comments and blank lines skipped
//! - **Recipient tables**: tab-separated `community[<TAB>group]`
//! - **Directories**: every visible file becomes an [`ImportableFile`] titled
//!   by its stem
//!
//! [`ImportableFile`]: crate::core::file::ImportableFile

pub mod files;
pub mod list;

pub use list::ParseError;
