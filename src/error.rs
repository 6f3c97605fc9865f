//! Error types shared by the encode and decode paths.
//!
//! Mirrors the error-handling shape used throughout this crate's ancestry:
//! plain `Copy` enums with a hand-written [`fmt::Display`] and
//! [`std::error::Error`] impl (no proc-macro derive), so callers that want to
//! bubble the error up through `anyhow`/`?` get a real `Error` impl for free.

use std::fmt;

/// Errors produced while compressing a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// `src` is shorter than the minimum block length (9 bytes).
    InputTooSmall,
    /// `dst` cannot hold the worst-case output for this input size.
    OutputTooSmall,
    /// The external suffix-sorting collaborator reported failure.
    SortFailed,
    /// An internal allocation or invariant failed.
    Internal,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EncodeError::InputTooSmall => "input shorter than the minimum block size (9 bytes)",
            EncodeError::OutputTooSmall => "destination buffer too small for worst-case output",
            EncodeError::SortFailed => "suffix sort collaborator failed",
            EncodeError::Internal => "internal allocation or invariant failure",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for EncodeError {}

/// Errors produced while decompressing a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The input is truncated, has an unrecognised header, or contains a
    /// token (offset, length, or VLC codeword) that cannot be satisfied by
    /// the remaining input or output bounds.
    Malformed,
    /// `dst` is smaller than the declared decompressed length.
    OutputTooSmall,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DecodeError::Malformed => "malformed or truncated compressed input",
            DecodeError::OutputTooSmall => "destination buffer smaller than decompressed length",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for DecodeError {}
