//! Error types emitted by the timeline CLI.

use std::path::PathBuf;

use thiserror::Error;
use tideline_scorer::WeightsError;

/// Errors emitted by the timeline CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Opening the payload file failed.
    #[error("failed to open payload at {path:?}: {source}")]
    OpenPayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the payload from standard input failed.
    #[error("failed to read payload from stdin: {0}")]
    ReadStdin(#[source] std::io::Error),
    /// The payload JSON could not be decoded.
    #[error("failed to parse timeline payload: {0}")]
    ParsePayload(#[source] serde_json::Error),
    /// Opening the weights configuration file failed.
    #[error("failed to open weights at {path:?}: {source}")]
    OpenWeights {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The weights JSON could not be decoded.
    #[error("failed to parse weights configuration: {0}")]
    ParseWeights(#[source] serde_json::Error),
    /// The weights configuration failed validation.
    #[error(transparent)]
    InvalidWeights(#[from] WeightsError),
    /// Serialising the ranked timeline failed.
    #[error("failed to serialise ranked timeline: {0}")]
    SerialiseTimeline(#[source] serde_json::Error),
    /// Writing the ranked output failed.
    #[error("failed to write ranked output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
