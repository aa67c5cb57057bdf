//! Error types for the Ism format
//!
//! Provides a unified error type for all encode/decode operations.

use std::io;

use thiserror::Error;

/// Result type alias using IsmError
pub type Result<T> = std::result::Result<T, IsmError>;

/// Unified error type for Ism format operations
#[derive(Debug, Error)]
pub enum IsmError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    /// Malformed configuration or call arguments, detected before any I/O
    #[error("Invalid argument: {0}")]
    Argument(String),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    /// Structural violation in encoded bytes (bad tag, bad version, truncation)
    #[error("Format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Contract Errors
    // -------------------------------------------------------------------------
    /// An invariant that construction should guarantee was broken at use time
    #[error("Illegal state: {0}")]
    State(String),

    /// A coder required to be deterministic is not
    #[error("Coder {coder} is not deterministic: {reason}")]
    NonDeterministic { coder: String, reason: String },
}

impl IsmError {
    /// Map an I/O error raised while decoding; running out of input is truncation
    pub(crate) fn from_decode(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            IsmError::Format(format!("Truncated input while decoding {}", what))
        } else {
            IsmError::Io(err)
        }
    }

    /// Returns true if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, IsmError::Format(_))
    }
}
