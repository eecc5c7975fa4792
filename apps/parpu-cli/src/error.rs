//! # CLI Error Type
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  config.toml ── read/parse ──► Io / ConfigParse / InvalidConfig ──┐     │
//! │  *.json ─────── read/parse ──► Io / DataFile ─────────────────────┤     │
//! │  parpu-core ── ledger/report ► Core(CoreError) ───────────────────┤     │
//! │  user input ── validation ───► Validation(ValidationError) ───────┤     │
//! │                                                                   ▼     │
//! │                                   CliError ──► anyhow in main ──► exit 1│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use parpu_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A data file is not a JSON array of the expected records.
    #[error("Data file error: {0}")]
    DataFile(#[from] serde_json::Error),

    /// Neither a flag nor the platform supplied a location.
    #[error("No default {0} path available on this platform")]
    NoDefaultPath(&'static str),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type CliResult<T> = Result<T, CliError>;
