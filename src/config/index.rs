//! Index configuration module.
//!
//! This module defines the serializable settings for the pattern index and
//! converts them into the index's own [`LanaiIndexConfig`].

use super::{ConfigResult, Validate};
use crate::data_structures::lanai_index::{LanaiIndexConfig, DEFAULT_MAX_DEPTH, DEFAULT_WILDCARD};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_depth`.
const MAX_DEPTH_LIMIT: usize = 1024;

/// Pattern index configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Maximum container nesting depth of a stored pattern
    pub max_depth: usize,

    /// String value treated as a wildcard in stored patterns
    pub wildcard: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            wildcard: DEFAULT_WILDCARD.to_string(),
        }
    }
}

impl IndexConfig {
    /// Builds the index configuration these settings describe.
    pub fn to_index_config(&self) -> LanaiIndexConfig {
        LanaiIndexConfig::new()
            .with_max_depth(self.max_depth)
            .with_wildcard(self.wildcard.clone())
    }
}

impl Validate for IndexConfig {
    fn validate(&self) -> ConfigResult<()> {
        // Validate max_depth
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                key: "index.max_depth".to_string(),
                message: format!("must be between 1 and {MAX_DEPTH_LIMIT}"),
            });
        }

        // Validate wildcard
        if self.wildcard.is_empty() {
            return Err(ConfigError::ValidationError(
                "wildcard must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
