//! Error types for the Mini VM.

use mvm_asm::CodecError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors for a single execution run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    #[error("Address {address} out of bounds for memory range [{low}, {high}]")]
    OutOfBounds { address: i64, low: usize, high: usize },

    #[error("Invalid execution window [{low}, {high}]: low bound exceeds high bound")]
    InvalidWindow { low: usize, high: usize },

    #[error("Invalid execution window '{0}': expected \"low,high\"")]
    InvalidWindowSpec(String),

    #[error("Decode error: {0}")]
    Decode(#[from] CodecError),
}

/// Errors from running a binary file and persisting its trace.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Binary file {0} does not exist")]
    MissingBinary(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize trace: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Runtime error: {0}")]
    Vm(#[from] VmError),
}

impl RunError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunError::Io {
            path: path.into(),
            source,
        }
    }
}
