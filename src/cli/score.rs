//! Score command - show how two strings compare under each similarity measure.
//!
//! Useful for picking thresholds: the fuzzy pass uses `ratio`, the token pass
//! uses `token_sort_ratio`.

use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::scoring::{levenshtein_score, ratio, sort_tokens, token_sort_ratio};

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// First string
    #[arg(required = true)]
    pub a: String,

    /// Second string
    #[arg(required = true)]
    pub b: String,

    /// Only pass if the fuzzy ratio reaches this threshold (0-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: Option<u32>,
}

struct Scores {
    ratio: u32,
    token_sort_ratio: u32,
    levenshtein: u32,
}

impl Scores {
    fn compute(a: &str, b: &str) -> Self {
        Self {
            ratio: ratio(a, b),
            token_sort_ratio: token_sort_ratio(a, b),
            levenshtein: levenshtein_score(a, b),
        }
    }
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if JSON output fails, or if `--threshold` is given and the
/// ratio falls below it.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let scores = Scores::compute(&args.a, &args.b);

    if verbose {
        eprintln!(
            "Sorted tokens: '{}' vs '{}'",
            sort_tokens(&args.a),
            sort_tokens(&args.b)
        );
    }

    match format {
        OutputFormat::Text => {
            println!("\nScoring '{}' vs '{}'\n", args.a, args.b);
            println!("   ratio:            {}", scores.ratio);
            println!("   token_sort_ratio: {}", scores.token_sort_ratio);
            println!("   levenshtein:      {}", scores.levenshtein);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "a": args.a,
                "b": args.b,
                "ratio": scores.ratio,
                "token_sort_ratio": scores.token_sort_ratio,
                "levenshtein": scores.levenshtein,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("a\tb\tratio\ttoken_sort_ratio\tlevenshtein");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                args.a, args.b, scores.ratio, scores.token_sort_ratio, scores.levenshtein
            );
        }
    }

    if let Some(threshold) = args.threshold {
        if scores.ratio < threshold {
            anyhow::bail!("ratio {} is below threshold {threshold}", scores.ratio);
        }
    }

    Ok(())
}
