//! Rule set error module.
//!
//! This module defines error types that may occur while reading a rule file
//! and loading its rules into a pattern index.

use std::path::PathBuf;
use thiserror::Error;

use crate::data_structures::LanaiIndexError;

/// Errors that can occur while loading rules.
#[derive(Error, Debug)]
pub enum RuleError {
    /// Error when the rule file cannot be read.
    #[error("Failed to read rule file {path:?}: {source}")]
    Read {
        /// Path of the rule file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Error when the rule document is not a valid rule list.
    #[error("Failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    /// Error when the index configuration is unusable.
    #[error("Invalid index configuration: {0}")]
    InvalidConfig(#[source] LanaiIndexError),

    /// Error when a single rule is rejected by the index.
    #[error("Rule #{position} rejected: {source}")]
    Rejected {
        /// Zero-based position of the rule in the document
        position: usize,
        /// Underlying index error
        #[source]
        source: LanaiIndexError,
    },
}
