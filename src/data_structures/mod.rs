//! Data structures for Lanai.
//!
//! This module contains the pattern index and its supporting types.
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Deterministic, canonical ordering wherever iteration order is observable
//! - Errors are returned, never panicked

pub mod lanai_index;

// Re-export common data structures
pub use lanai_index::{LanaiIndex, LanaiIndexError, LanaiIndexResult, SharedLanaiIndex};
