//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by the concrete
//! scalar-field implementations (Arkworks, blstrs) as well as the
//! crate-wide `Error` type returned by the policy, compiler and solver APIs.
//!
//! A requester whose attributes do not satisfy a policy is *not* an error:
//! the evaluator reports that case as `Ok(None)`. Everything in [`Error`]
//! indicates a caller bug or malformed input.
//!
//! # Examples
//!
//! ```rust
//! use lsss::errors::Error;
//! ```

use thiserror::Error;

/// Errors bubbled up from backend implementations (Arkworks, blstrs, etc.).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(&'static str),
    #[error("unsupported backend feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("serialization failure: {0}")]
    Serialization(&'static str),
    #[error("math error: {0}")]
    Math(&'static str),
}

/// High-level errors returned by the access-structure API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("malformed access tree: {0}")]
    MalformedTree(String),
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("policy syntax error at byte {position}: {reason}")]
    PolicySyntax { position: usize, reason: String },
    #[error("policy exceeds limits: {0}")]
    PolicyTooLarge(String),
}
