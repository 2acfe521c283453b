// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Lanai pattern index.

use super::error::LanaiIndexError;

/// Default limit on container nesting inside a single pattern.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default wildcard token.
pub const DEFAULT_WILDCARD: &str = "*";

/// Configuration for the Lanai pattern index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanaiIndexConfig {
    /// Maximum number of nested container levels a stored pattern may have.
    /// The top level counts as one.
    max_depth: usize,

    /// String value that, when stored in a pattern, matches any scalar.
    wildcard: String,
}

impl LanaiIndexConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - max_depth: 64
    /// - wildcard: "*"
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            wildcard: DEFAULT_WILDCARD.to_string(),
        }
    }

    /// Set the maximum nesting depth of stored patterns.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the wildcard token.
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }

    /// Get the maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Get the wildcard token.
    pub fn wildcard(&self) -> &str {
        &self.wildcard
    }

    /// Check that the configuration can be used to build an index.
    pub fn validate(&self) -> Result<(), LanaiIndexError> {
        if self.max_depth == 0 {
            return Err(LanaiIndexError::PatternTooDeep {
                depth: 1,
                max_depth: 0,
            });
        }
        if self.wildcard.is_empty() {
            return Err(LanaiIndexError::InvalidWildcard(self.wildcard.clone()));
        }
        Ok(())
    }
}

impl Default for LanaiIndexConfig {
    fn default() -> Self {
        Self::new()
    }
}
