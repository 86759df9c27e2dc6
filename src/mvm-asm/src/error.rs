//! Error types for encoding, decoding and assembling programs.

use crate::types::Opcode;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the bit-field codec itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Register index {0} does not fit the 3-bit register field (0-7)")]
    RegisterOutOfRange(i64),

    #[error("Operand {value} out of range for {opcode} ({min}..={max})")]
    OperandOutOfRange {
        opcode: Opcode,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid opcode tag {tag} at offset {offset}")]
    InvalidOpcodeTag { tag: u8, offset: usize },

    #[error("Truncated instruction at offset {offset}: {available} byte(s) left, need at least 2")]
    Truncated { offset: usize, available: usize },
}

/// A source line that could not be turned into bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("Expected a mnemonic and two operands, got {found} token(s)")]
    MissingOperands { found: usize },

    #[error("Operands must be integers, got '{0}'")]
    InvalidOperand(String),

    #[error(transparent)]
    Range(#[from] CodecError),
}

/// Errors from assembling a source file to disk.
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Source file {0} does not exist")]
    MissingSource(PathBuf),

    #[error("Output file {0} is not a .bin file")]
    NotABinFile(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize assembly log: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AssembleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssembleError::Io {
            path: path.into(),
            source,
        }
    }
}
