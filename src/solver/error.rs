//! # Solver Error Module
//!
//! One error type for the whole request pipeline. Backend messages are
//! carried through verbatim so the user sees exactly what the symbolic
//! engine complained about, with no extra framing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    /// The expression text did not parse.
    #[error("cannot parse `{input}`: {reason}")]
    Parse { input: String, reason: String },

    /// The request is missing a parameter the operation needs.
    #[error("operation requires the `{0}` parameter")]
    MissingParameter(&'static str),

    /// The request parameters are inconsistent.
    #[error("{0}")]
    Validation(String),

    /// The symbolic engine rejected the computation; its message is shown
    /// as-is.
    #[error("{0}")]
    Backend(String),

    /// The plot file could not be produced.
    #[error("cannot write plot to `{path}`: {reason}")]
    Plot { path: PathBuf, reason: String },
}
