// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lanai Pattern Index Implementation
//!
//! This module provides a trie-based index of structured JSON patterns. Each
//! stored pattern carries a payload, and a query returns every stored pattern
//! whose key/value pairs are a subset of the query's, most specific first.
//!
//! # Features
//!
//! - Object, array and scalar patterns, with arbitrarily nested objects
//! - Wildcard values that match any value at their position
//! - Ranking by specificity, then by insertion order
//! - Exact retrieval and removal by pattern signature, with branch pruning
//!
//! # Example
//!
//! ```
//! use lanai_lib::data_structures::lanai_index::LanaiIndex;
//! use serde_json::json;
//!
//! let mut index = LanaiIndex::new();
//! index.add(&json!({"type": "order"}), "orders").unwrap();
//! index.add(&json!({"type": "order", "region": "eu"}), "eu-orders").unwrap();
//! index.add(&json!({"type": "refund"}), "refunds").unwrap();
//!
//! let hits = index.match_data(&json!({"type": "order", "region": "eu", "total": 12}));
//! assert_eq!(hits, vec![&"eu-orders", &"orders"]);
//!
//! assert_eq!(index.get(&json!({"type": "refund"})), Some(&"refunds"));
//! assert_eq!(index.remove(&json!({"type": "refund"}), None), 1);
//! assert_eq!(index.get(&json!({"type": "refund"})), None);
//! ```
//!
//! # Canonical paths
//!
//! A pattern is stored along one path of edge labels. Keys are visited in
//! sorted order and each scalar field contributes a key label followed by a
//! value label. Nested containers are bracketed by begin and end markers, and
//! arrays start below a dedicated array root, so array patterns never match
//! object queries and the reverse.

mod canonical;
mod config;
mod error;
mod label;
mod matcher;
mod node;
mod shared;
mod signature;

use serde_json::Value;

pub use config::{LanaiIndexConfig, DEFAULT_MAX_DEPTH, DEFAULT_WILDCARD};
pub use error::LanaiIndexError;
pub use label::Label;
pub use matcher::PatternMatch;
pub use node::{Entry, TrieNode};
pub use shared::{SharedLanaiIndex, SharedMatch};
pub use signature::Signature;

/// Result type for Lanai index operations
pub type LanaiIndexResult<T> = Result<T, LanaiIndexError>;

/// Lanai Pattern Index stores JSON patterns with payloads and answers subset
/// queries over them.
///
/// The index is single-threaded: mutation needs `&mut self`. Wrap it in a
/// [`SharedLanaiIndex`] to share it across threads.
#[derive(Debug, Clone)]
pub struct LanaiIndex<D> {
    /// The root node of the trie
    root: TrieNode<D>,

    /// Number of entries currently stored
    len: usize,

    /// Insertion index handed to the next successful `add`
    next_index: u64,

    /// Configuration options
    config: LanaiIndexConfig,
}

impl<D> LanaiIndex<D> {
    /// Creates a new empty `LanaiIndex` with default configuration.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
            next_index: 0,
            config: LanaiIndexConfig::default(),
        }
    }

    /// Creates a new empty `LanaiIndex` with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the index.
    ///
    /// # Returns
    ///
    /// * `Ok(LanaiIndex)` - The new index.
    /// * `Err(LanaiIndexError)` - If the configuration is unusable.
    pub fn with_config(config: LanaiIndexConfig) -> LanaiIndexResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Returns the configuration of this index.
    pub fn config(&self) -> &LanaiIndexConfig {
        &self.config
    }

    /// Stores `data` under `pattern`.
    ///
    /// # Arguments
    ///
    /// * `pattern` - Object, array or scalar pattern.
    /// * `data` - Payload returned when the pattern matches.
    ///
    /// # Returns
    ///
    /// * `Ok(&mut Self)` - The index, for chaining.
    /// * `Err(LanaiIndexError)` - If the pattern nests deeper than `max_depth`.
    pub fn add(&mut self, pattern: &Value, data: D) -> LanaiIndexResult<&mut Self> {
        let path = canonical::canonical_path(pattern, self.config.wildcard(), self.config.max_depth())?;
        let signature = Signature::of(pattern);

        let insertion_index = self.next_index;
        self.next_index += 1;
        self.len += 1;

        let mut trunk = &mut self.root;
        for label in path {
            trunk = trunk.grab_branch(label);
        }
        tracing::trace!(signature = signature.as_str(), insertion_index, "pattern added");
        trunk.attach(Entry {
            data,
            insertion_index,
            signature,
        });

        Ok(self)
    }

    /// Returns every stored pattern that is a subset of `query`.
    ///
    /// Results are ordered by specificity, most specific first, and then by
    /// insertion order. The empty object pattern matches every object query
    /// and the empty array pattern every array query.
    pub fn matches(&self, query: &Value) -> Vec<PatternMatch<'_, D>> {
        let mut matches = matcher::search(&self.root, query);
        matcher::rank(&mut matches);
        matches
    }

    /// Returns the payloads of [`matches`](Self::matches), in the same order.
    pub fn match_data(&self, query: &Value) -> Vec<&D> {
        self.matches(query).into_iter().map(|m| m.data).collect()
    }

    /// Returns the most recently added payload stored under exactly `pattern`.
    ///
    /// Patterns that merely match `pattern` are not considered.
    pub fn get(&self, pattern: &Value) -> Option<&D> {
        self.get_all(pattern).pop()
    }

    /// Returns every payload stored under exactly `pattern`, oldest first.
    pub fn get_all(&self, pattern: &Value) -> Vec<&D> {
        let Some(terminal) = self.terminal(pattern) else {
            return Vec::new();
        };
        terminal
            .entries_for(Signature::of(pattern))
            .map(|entry| &entry.data)
            .collect()
    }

    /// Returns `true` if anything is stored under exactly `pattern`.
    pub fn contains(&self, pattern: &Value) -> bool {
        !self.get_all(pattern).is_empty()
    }

    fn terminal(&self, pattern: &Value) -> Option<&TrieNode<D>> {
        // Too deep to have been stored
        let path = canonical::canonical_path(pattern, self.config.wildcard(), self.config.max_depth()).ok()?;
        self.root.descend(&path)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the root of the trie, for diagnostics.
    pub fn dump(&self) -> &TrieNode<D> {
        &self.root
    }

    /// Removes every pattern.
    ///
    /// Insertion indices keep counting from where they were.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.len = 0;
    }
}

impl<D: PartialEq> LanaiIndex<D> {
    /// Removes payloads stored under exactly `pattern`.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The pattern the payloads were added with.
    /// * `data` - Only remove payloads equal to this one; `None` removes all.
    ///
    /// # Returns
    ///
    /// The number of entries removed. Nodes left empty are pruned.
    pub fn remove(&mut self, pattern: &Value, data: Option<&D>) -> usize {
        let Ok(path) = canonical::canonical_path(pattern, self.config.wildcard(), self.config.max_depth()) else {
            return 0;
        };
        let signature = Signature::of(pattern);

        let removed = self.root.purge(&path, &signature, data);
        self.len -= removed;
        if removed > 0 {
            tracing::trace!(signature = signature.as_str(), removed, "pattern removed");
        }
        removed
    }
}

impl<D> Default for LanaiIndex<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_index_basic_operations() {
        let mut index = LanaiIndex::new();

        // Test initial state
        assert!(index.is_empty());
        assert!(index.dump().is_vacant());

        // Test insertion
        index.add(&json!({"a": 1}), "DATA1").unwrap();
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());

        // Test retrieval
        assert_eq!(index.get(&json!({"a": 1})), Some(&"DATA1"));
        assert!(index.contains(&json!({"a": 1})));
        assert_eq!(index.get(&json!({"a": 2})), None);
        assert!(!index.contains(&json!({})));

        // Test removal
        assert_eq!(index.remove(&json!({"a": 1}), None), 1);
        assert!(index.is_empty());
        assert!(index.dump().is_vacant());
        assert_eq!(index.remove(&json!({"a": 1}), None), 0);
    }

    #[test]
    fn test_add_chains() {
        let mut index = LanaiIndex::new();
        index
            .add(&json!({"a": 1}), 1)
            .unwrap()
            .add(&json!({"b": 2}), 2)
            .unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_get_ignores_partial_matches() {
        let mut index = LanaiIndex::new();
        index.add(&json!({"a": 1}), "DATA1").unwrap();
        index.add(&json!({"a": 1, "c": 3, "d": 4}), "DATA2").unwrap();
        index.add(&json!({"a": 1, "b": 2}), "DATA3").unwrap();
        index.add(&json!({}), "DATA5").unwrap();

        assert_eq!(index.get(&json!({"a": 1, "b": 2})), Some(&"DATA3"));
        assert_eq!(index.get(&json!({"a": 1, "b": 2, "c": 3})), None);
        assert_eq!(index.get(&json!({})), Some(&"DATA5"));
    }

    #[test]
    fn test_get_is_not_shadowed_by_wildcard() {
        let mut index = LanaiIndex::new();
        index.add(&json!({"b": "*"}), "wild").unwrap();
        index.add(&json!({"b": 5}), "five").unwrap();

        assert_eq!(index.match_data(&json!({"b": 5})), vec![&"wild"]);
        assert_eq!(index.get(&json!({"b": 5})), Some(&"five"));
        assert_eq!(index.get(&json!({"b": "*"})), Some(&"wild"));
    }

    #[test]
    fn test_get_distinguishes_falsy_payloads() {
        let mut index = LanaiIndex::new();
        index.add(&json!({"a": 1}), 0).unwrap();

        assert_eq!(index.get(&json!({"a": 1})), Some(&0));
        assert_eq!(index.get(&json!({"c": 1})), None);
    }

    #[test]
    fn test_too_deep_pattern_is_rejected() {
        let config = LanaiIndexConfig::new().with_max_depth(2);
        let mut index = LanaiIndex::with_config(config).unwrap();

        assert!(index.add(&json!({"a": {"b": 1}}), 1).is_ok());
        let err = index.add(&json!({"a": {"b": {"c": 1}}}), 2).unwrap_err();
        assert_eq!(err, LanaiIndexError::PatternTooDeep { depth: 3, max_depth: 2 });

        // The failed add did not consume an insertion index
        index.add(&json!({"z": 1}), 3).unwrap();
        let hits = index.matches(&json!({"z": 1}));
        assert_eq!(hits[0].insertion_index, 1);
        assert_eq!(index.len(), 2);

        // Nothing that deep can be present
        assert_eq!(index.get(&json!({"a": {"b": {"c": 1}}})), None);
        assert_eq!(index.remove(&json!({"a": {"b": {"c": 1}}}), None), 0);
    }

    #[test]
    fn test_with_config_validates() {
        let config = LanaiIndexConfig::new().with_wildcard("");
        assert!(LanaiIndex::<u8>::with_config(config).is_err());
    }

    #[test]
    fn test_custom_wildcard() {
        let config = LanaiIndexConfig::new().with_wildcard("ANY");
        let mut index = LanaiIndex::with_config(config).unwrap();
        index.add(&json!({"a": "ANY"}), "any").unwrap();
        index.add(&json!({"a": "*"}), "star").unwrap();

        assert_eq!(index.match_data(&json!({"a": 7})), vec![&"any"]);
    }

    #[test]
    fn test_clear_keeps_counting() {
        let mut index = LanaiIndex::new();
        index.add(&json!({"a": 1}), "first").unwrap();
        index.clear();
        assert!(index.is_empty());
        assert!(index.dump().is_vacant());

        index.add(&json!({"a": 1}), "second").unwrap();
        assert_eq!(index.matches(&json!({"a": 1}))[0].insertion_index, 1);
    }

    #[test]
    fn test_signature_reported_with_match() {
        let mut index = LanaiIndex::new();
        index.add(&json!({"b": 2, "a": 1}), ()).unwrap();

        let hits = index.matches(&json!({"a": 1, "b": 2}));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].signature.as_str(), r#"{"a":1,"b":2}"#);
        assert_eq!(hits[0].specificity, 2);
    }

    #[test_case(json!({"a": 1}), json!({"a": "1"}) ; "number and string")]
    #[test_case(json!({"a": true}), json!({"a": "true"}) ; "boolean and string")]
    #[test_case(json!({"a": null}), json!({"a": "null"}) ; "null and string")]
    #[test_case(json!([1]), json!(["1"]) ; "array elements")]
    fn test_patterns_sharing_a_path_stay_apart(first: Value, second: Value) {
        let mut index = LanaiIndex::new();
        index.add(&first, "X").unwrap();
        index.add(&second, "Y").unwrap();

        // Both end at one node, so both match either query
        assert_eq!(index.match_data(&first), vec![&"X", &"Y"]);

        assert_eq!(index.get(&first), Some(&"X"));
        assert_eq!(index.get_all(&first), vec![&"X"]);
        assert_eq!(index.get_all(&second), vec![&"Y"]);

        assert_eq!(index.remove(&second, None), 1);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&first), Some(&"X"));
        assert_eq!(index.get(&second), None);

        assert_eq!(index.remove(&first, None), 1);
        assert!(index.dump().is_vacant());
    }
}
