//! Lanai Library
//!
//! This library contains the core components of Lanai, an in-memory
//! subset-matching pattern index: the index itself, rule file loading, and
//! the configuration and error handling shared with the `lanai` binary.
//!
//! # Architecture
//!
//! Lanai is designed with the following principles in mind:
//! - Strict component boundaries
//! - Deterministic results: canonical key order, stable ranking
//! - Comprehensive error handling and propagation
//! - Single-threaded core, with locking left to an explicit wrapper

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod rules;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Lanai.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Registers the tracing-backed error reporter.
pub fn init() {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
}
