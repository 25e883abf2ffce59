//! Workspace error type.
//!
//! "Not found" is never an error here: path and snap queries return `None`.
//! `FqError` covers bad configuration and unreadable input data only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FqError {
    #[error("tolerance must be a positive finite number, got {0}")]
    InvalidTolerance(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `fq-*` crates.
pub type FqResult<T> = Result<T, FqError>;
