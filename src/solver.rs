//! # Solver Pipeline
//!
//! The request-level layer on top of the symbolic engine: input
//! normalization, operation dispatch, plotting and the error type shared
//! by all of them.

/// request and outcome types plus the operation router
pub mod dispatch;
/// the pipeline-wide error type
pub mod error;
/// user input to parser syntax rewriting
pub mod normalize;
/// expression plotting to PNG
pub mod plots;
