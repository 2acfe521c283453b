//! Error types for the Lanai pattern index.
//!
//! This module defines the error types that can occur during index operations.

/// Errors that can occur in Lanai index operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LanaiIndexError {
    /// Error when a pattern nests containers deeper than allowed.
    #[error("Pattern nesting depth {depth} exceeds maximum of {max_depth}")]
    PatternTooDeep {
        /// Nesting depth of the rejected pattern.
        depth: usize,
        /// The maximum allowed depth.
        max_depth: usize,
    },

    /// Error when the configured wildcard token is unusable.
    #[error("Invalid wildcard token: {0:?}")]
    InvalidWildcard(String),
}
