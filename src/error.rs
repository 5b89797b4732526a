//! Failure classes of a conversion run.
//!
//! Each class maps to its own process exit code so wrapper scripts can
//! tell an unreadable input apart from a broken output pipe.

use crate::audit::parser::ParseError;
use std::io;
use thiserror::Error;

/// Fatal errors raised while converting a log file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input file could not be opened (or its decoder could not start)
    #[error("failed to open {path}")]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Output could not be flushed or synced at the end of the run
    #[error("failed to close output")]
    FileClose(#[source] io::Error),

    /// A record could not be encoded as JSON
    #[error("failed to serialize record at line {line}")]
    Serialization {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Reading the input failed part way through
    #[error("failed to read line {line} of {path}")]
    Scan {
        path: String,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A document could not be written to the output
    #[error("failed to write record at line {line}")]
    OutputWrite {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A line failed to parse while strict parsing is enabled
    #[error("failed to parse line {line}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

impl ConvertError {
    /// Process exit code for this failure class
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::FileOpen { .. } => 3,
            Self::FileClose(_) => 4,
            Self::Serialization { .. } => 5,
            Self::Scan { .. } => 6,
            Self::OutputWrite { .. } => 7,
            Self::Parse { .. } => 8,
        }
    }
}

/// Exit code for an error chain.
///
/// Looks for a [`ConvertError`] anywhere under added context and falls back
/// to `1` for anything else. Code `2` is left to clap usage errors.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ConvertError>())
        .map_or(1, ConvertError::exit_code)
}
