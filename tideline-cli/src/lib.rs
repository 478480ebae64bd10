//! Command-line timeline ranker.
//!
//! Reads a JSON timeline payload from a file or stdin, derives the content
//! signals the payload does not carry, ranks the batch with the weighted
//! scorer, and writes the display window back out as JSON.
#![forbid(unsafe_code)]

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tideline_scorer::{RelevanceScorer, RelevanceWeights};

mod analysis;
mod error;
mod payload;
mod rank;

pub use error::CliError;
pub use payload::{
    Attachment, AuthorRecord, PostRecord, QuotedPost, RankedPayload, RankedRecord, TimelinePayload,
};
pub use rank::rank_timeline;

/// Run the timeline CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when the payload cannot be read, decoded, ranked, or
/// written back out.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli, &mut stdout)
}

fn run_with(cli: Cli, writer: &mut dyn Write) -> Result<(), CliError> {
    let payload = read_payload(cli.payload.as_deref())?;
    let scorer = build_scorer(cli.weights.as_deref())?;
    let mut rng = cli
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let now = cli.now.unwrap_or_else(current_unix_seconds);

    let ranked = rank::rank_timeline(payload, &scorer, &mut rng, now);
    write_ranked(writer, &ranked)
}

#[derive(Debug, Parser)]
#[command(
    name = "tideline",
    about = "Rank a JSON timeline payload into a display window",
    version
)]
struct Cli {
    /// Path to the JSON payload; stdin when omitted.
    #[arg(value_name = "path")]
    payload: Option<PathBuf>,
    /// Path to a JSON weights configuration overriding the defaults.
    #[arg(long, value_name = "path")]
    weights: Option<PathBuf>,
    /// Seed for the tie-breaking random factor, for reproducible runs.
    #[arg(long, value_name = "u64")]
    seed: Option<u64>,
    /// Override the current time, in Unix seconds.
    #[arg(long, value_name = "secs")]
    now: Option<i64>,
}

fn read_payload(path: Option<&Path>) -> Result<TimelinePayload, CliError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::OpenPayload {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::ReadStdin)?;
            buffer
        }
    };
    serde_json::from_str(&text).map_err(CliError::ParsePayload)
}

fn build_scorer(weights_path: Option<&Path>) -> Result<RelevanceScorer, CliError> {
    let weights = match weights_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::OpenWeights {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str::<RelevanceWeights>(&text).map_err(CliError::ParseWeights)?
        }
        None => RelevanceWeights::default(),
    };
    Ok(RelevanceScorer::new(weights)?)
}

fn write_ranked(writer: &mut dyn Write, ranked: &RankedPayload) -> Result<(), CliError> {
    let encoded = serde_json::to_string_pretty(ranked).map_err(CliError::SerialiseTimeline)?;
    writer
        .write_all(encoded.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)
}

fn current_unix_seconds() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests;
