//! Command-line interface for item-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **reconcile**: Pair a list of expected items with candidate files
//! - **score**: Show the similarity scores of two strings
//!
//! ## Usage
//!
//! ```text
//! # Match message titles against a folder of recordings
//! item-matcher reconcile titles.txt recordings/
//!
//! # Stricter fuzzy matching, no token pass
//! item-matcher reconcile titles.txt recordings/ --fuzzy-threshold 90 --no-token
//!
//! # Match greeting recipients, JSON output for scripting
//! item-matcher reconcile recipients.tsv greetings/ --recipients --format json
//!
//! # Check how two names score
//! item-matcher score "John Doe" "Jon Doe"
//! ```

use clap::{Parser, Subcommand};

pub mod reconcile;
pub mod score;

#[derive(Parser)]
#[command(name = "item-matcher")]
#[command(version)]
#[command(about = "Reconcile expected items with candidate files by exact, fuzzy and token matching")]
#[command(
    long_about = "item-matcher pairs a list of expected items (content slots or recipients) with the files found for them.\n\nMatching runs in passes:\n- Exact: identical names\n- Fuzzy: edit-distance similarity above a threshold\n- Token: the same, ignoring word order\n\nEach pass assigns greedily, best score first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile a left list against candidate files
    Reconcile(reconcile::ReconcileArgs),

    /// Score two strings
    Score(score::ScoreArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
