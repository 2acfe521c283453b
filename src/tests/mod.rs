//! Test modules for Lanai.
//!
//! This module contains the crate-internal testing infrastructure:
//! - Scenario tests for the pattern index
//! - Property-based tests using proptest
//! - Configuration and error handling tests
//! - Test fixtures and utilities


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{
    create_test_dir, flat_object_strategy, is_subset, nested_object_strategy, to_json, TestFixture,
};
