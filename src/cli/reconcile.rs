//! Reconcile command - pair a list of expected items with candidate files.
//!
//! The left side is a label list (each label becomes an audio slot) or, with
//! `--recipients`, a recipient table. The right side is a directory of files
//! or a text file of file names.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::core::audio::AudioMatchable;
use crate::core::file::ImportableFile;
use crate::core::item::{Matchable, MatchableItem};
use crate::core::state::MatchState;
use crate::core::target::{AudioTarget, Recipient, Target};
use crate::matching::engine::{Matcher, MatchingConfig};
use crate::matching::recipient::RecipientScoring;
use crate::matching::stats::MatchStats;
use crate::parsing::{files, list};

/// Arguments for the reconcile command
#[derive(Args)]
pub struct ReconcileArgs {
    /// Left side: a file of labels, one per line (or a recipient table with --recipients)
    #[arg(required = true)]
    pub left: PathBuf,

    /// Right side: a directory of candidate files, or a file of file names
    #[arg(required = true)]
    pub right: PathBuf,

    /// JSON matching configuration; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum score (0-100) for a fuzzy match
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub fuzzy_threshold: Option<u32>,

    /// Minimum score (0-100) for a token match
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub token_threshold: Option<u32>,

    /// Skip the exact pass
    #[arg(long)]
    pub no_exact: bool,

    /// Skip the fuzzy pass
    #[arg(long)]
    pub no_fuzzy: bool,

    /// Skip the token pass
    #[arg(long)]
    pub no_token: bool,

    /// Read LEFT as a tab-separated table of community and optional group
    #[arg(long)]
    pub recipients: bool,

    /// Only list directory files with these extensions (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,
}

/// One row of the reconciled list.
#[derive(Debug, Serialize)]
struct Row {
    status: String,
    state: MatchState,
    score: u32,
    left: Option<String>,
    right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    importable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation: Option<String>,
}

/// Execute the reconcile command
///
/// # Errors
///
/// Returns an error if inputs cannot be read, the configuration is invalid, or
/// either side holds duplicates.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ReconcileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let right = load_right(&args.right, &args.extensions)?;

    if verbose {
        eprintln!(
            "Passes: exact={} fuzzy={}@{} token={}@{}",
            config.exact, config.fuzzy, config.fuzzy_threshold, config.token, config.token_threshold
        );
        eprintln!("Right: {} candidates from {}", right.len(), args.right.display());
    }

    if args.recipients {
        let left = list::parse_recipient_file(&args.left)?;
        warn_if_empty(left.len(), right.len());

        let mut matcher: Matcher<MatchableItem<Recipient, ImportableFile>, _> =
            Matcher::with_scorer(RecipientScoring);
        matcher.seed(left, right, MatchableItem::new)?;
        let stats = matcher.auto_match(&config)?;
        let rows = build_rows(&matcher, |_| None);
        report(&args, &config, &stats, &rows, format)
    } else {
        let left: Vec<AudioTarget> = list::parse_label_file(&args.left)?
            .into_iter()
            .map(AudioTarget::new)
            .collect();
        warn_if_empty(left.len(), right.len());

        let mut matcher: Matcher<AudioMatchable> = Matcher::new();
        matcher.seed(left, right, AudioMatchable::new)?;
        let stats = matcher.auto_match(&config)?;
        let rows = build_rows(&matcher, |t| Some(t.operation().to_string()));
        report(&args, &config, &stats, &rows, format)
    }
}

fn build_config(args: &ReconcileArgs) -> anyhow::Result<MatchingConfig> {
    let mut config = match &args.config {
        Some(path) => MatchingConfig::load_from_file(path)?,
        None => MatchingConfig::default(),
    };

    if let Some(threshold) = args.fuzzy_threshold {
        config.fuzzy_threshold = threshold;
    }
    if let Some(threshold) = args.token_threshold {
        config.token_threshold = threshold;
    }
    config.exact &= !args.no_exact;
    config.fuzzy &= !args.no_fuzzy;
    config.token &= !args.no_token;

    config.validate()?;
    Ok(config)
}

fn load_right(path: &Path, extensions: &[String]) -> anyhow::Result<Vec<ImportableFile>> {
    if path.is_dir() {
        let extensions: Vec<&str> = extensions.iter().map(String::as_str).collect();
        let filter = (!extensions.is_empty()).then_some(extensions.as_slice());
        Ok(files::list_directory(path, filter)?)
    } else {
        Ok(list::parse_label_file(path)?
            .into_iter()
            .map(ImportableFile::new)
            .collect())
    }
}

fn warn_if_empty(left: usize, right: usize) {
    if left == 0 {
        warn!("Left side is empty; every candidate will be right only");
    }
    if right == 0 {
        warn!("Right side is empty; every item will be left only");
    }
}

fn build_rows<T, S>(matcher: &Matcher<T, S>, operation: impl Fn(&T) -> Option<String>) -> Vec<Row>
where
    T: Matchable<Right = ImportableFile>,
    T::Left: Display + Target,
{
    matcher
        .items()
        .iter()
        .map(|t| {
            let item = t.item();
            Row {
                status: item.status_label(),
                state: item.state(),
                score: item.score(),
                left: item.left().map(ToString::to_string),
                right: item.right().map(ToString::to_string),
                file: item.right().map(|f| f.path.display().to_string()),
                importable: item.is_importable(),
                operation: operation(t),
            }
        })
        .collect()
}

fn report(
    args: &ReconcileArgs,
    config: &MatchingConfig,
    stats: &MatchStats,
    rows: &[Row],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text(args, stats, rows),
        OutputFormat::Json => print_json(args, config, stats, rows)?,
        OutputFormat::Tsv => print_tsv(rows),
    }
    Ok(())
}

fn print_text(args: &ReconcileArgs, stats: &MatchStats, rows: &[Row]) {
    println!(
        "\nReconciling {} against {}\n",
        args.left.display(),
        args.right.display()
    );

    for row in rows {
        let status = if row.status.is_empty() {
            "-"
        } else {
            row.status.as_str()
        };
        let left = row.left.as_deref().unwrap_or("");
        let right = row.right.as_deref().unwrap_or("");
        match &row.operation {
            Some(op) => println!("   {status:<12} {op:<8} {left} <-> {right}"),
            None => println!("   {status:<12} {left} <-> {right}"),
        }
    }

    let matched = rows.iter().filter(|r| r.left.is_some() && r.right.is_some()).count();
    let left_only = rows.iter().filter(|r| r.right.is_none()).count();
    let right_only = rows.iter().filter(|r| r.left.is_none()).count();
    println!(
        "\n   {matched} matched, {left_only} left only, {right_only} right only ({stats})"
    );
}

fn print_json(
    args: &ReconcileArgs,
    config: &MatchingConfig,
    stats: &MatchStats,
    rows: &[Row],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "left": args.left.display().to_string(),
        "right": args.right.display().to_string(),
        "config": config,
        "stats": {
            "comparisons": stats.comparisons,
            "matches": stats.matches,
            "elapsed_us": u64::try_from(stats.elapsed_micros()).unwrap_or(u64::MAX),
        },
        "items": rows,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(rows: &[Row]) {
    println!("state\tscore\tleft\tright\tfile\timportable\toperation");
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.state.as_str(),
            row.score,
            row.left.as_deref().unwrap_or(""),
            row.right.as_deref().unwrap_or(""),
            row.file.as_deref().unwrap_or(""),
            row.importable,
            row.operation.as_deref().unwrap_or(""),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(left: PathBuf, right: PathBuf) -> ReconcileArgs {
        ReconcileArgs {
            left,
            right,
            config: None,
            fuzzy_threshold: None,
            token_threshold: None,
            no_exact: false,
            no_fuzzy: false,
            no_token: false,
            recipients: false,
            extensions: Vec::new(),
        }
    }

    #[test]
    fn test_build_config_overrides() {
        let mut a = args(PathBuf::from("l"), PathBuf::from("r"));
        a.fuzzy_threshold = Some(95);
        a.no_token = true;
        let config = build_config(&a).unwrap();
        assert_eq!(config.fuzzy_threshold, 95);
        assert!(config.exact);
        assert!(!config.token);
    }

    #[test]
    fn test_build_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"token_threshold": 70, "exact": false}"#).unwrap();

        let mut a = args(PathBuf::from("l"), PathBuf::from("r"));
        a.config = Some(path);
        let config = build_config(&a).unwrap();
        assert_eq!(config.token_threshold, 70);
        assert!(!config.exact);
    }

    #[test]
    fn test_build_config_rejects_low_threshold() {
        let mut a = args(PathBuf::from("l"), PathBuf::from("r"));
        a.fuzzy_threshold = Some(10);
        assert!(build_config(&a).is_err());
    }

    #[test]
    fn test_load_right_from_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.txt");
        fs::write(&path, "alice.mp3\nBob.wav\n").unwrap();

        let right = load_right(&path, &[]).unwrap();
        let titles: Vec<&str> = right.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["alice", "Bob"]);
    }

    #[test]
    fn test_build_rows_audio() {
        let mut matcher: Matcher<AudioMatchable> = Matcher::new();
        matcher
            .seed(
                vec![AudioTarget::new("Bob"), AudioTarget::new("Carol")],
                vec![ImportableFile::new("Bob.mp3"), ImportableFile::new("zed.mp3")],
                AudioMatchable::new,
            )
            .unwrap();
        matcher.auto_match(&MatchingConfig::default()).unwrap();

        let rows = build_rows(&matcher, |t| Some(t.operation().to_string()));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].status, "Exact");
        assert_eq!(rows[0].state, MatchState::ExactMatch);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["state"], "exact_match");
        assert_eq!(rows[0].operation.as_deref(), Some("Import"));
        assert!(rows[0].importable);
        assert_eq!(rows[0].file.as_deref(), Some("Bob.mp3"));
        let missing = rows.iter().find(|r| r.left.as_deref() == Some("Carol")).unwrap();
        assert_eq!(missing.operation.as_deref(), Some("Missing"));
        assert!(!missing.importable);
    }
}
