//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `EvError` as one variant
//! via `#[from]`, so parse failures of core types propagate with `?`.

use thiserror::Error;

/// The base error type for `ev-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `ev-core`.
pub type EvResult<T> = Result<T, EvError>;
