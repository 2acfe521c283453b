//! Thread-safe handle around a [`LanaiIndex`].
//!
//! The index itself does no synchronization. This wrapper serializes writers
//! and lets readers proceed together, taking the lock once per call.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use super::{LanaiIndex, LanaiIndexConfig, LanaiIndexResult, PatternMatch, Signature};

/// Owned copy of a [`PatternMatch`], returned once the read lock is released.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedMatch<D> {
    /// Payload stored with the pattern
    pub data: D,

    /// Number of matching steps taken to reach the pattern
    pub specificity: usize,

    /// Position of the `add` call that stored the payload
    pub insertion_index: u64,

    /// Signature of the matched pattern
    pub signature: Signature,
}

impl<D: Clone> From<PatternMatch<'_, D>> for SharedMatch<D> {
    fn from(m: PatternMatch<'_, D>) -> Self {
        Self {
            data: m.data.clone(),
            specificity: m.specificity,
            insertion_index: m.insertion_index,
            signature: m.signature.clone(),
        }
    }
}

/// Cloneable, lock-protected Lanai index.
#[derive(Debug)]
pub struct SharedLanaiIndex<D> {
    inner: Arc<RwLock<LanaiIndex<D>>>,
}

impl<D> Clone for SharedLanaiIndex<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D> SharedLanaiIndex<D> {
    /// Creates an empty shared index with default configuration.
    pub fn new() -> Self {
        Self::from_index(LanaiIndex::new())
    }

    /// Creates an empty shared index with the specified configuration.
    pub fn with_config(config: LanaiIndexConfig) -> LanaiIndexResult<Self> {
        LanaiIndex::with_config(config).map(Self::from_index)
    }

    /// Takes ownership of an existing index.
    pub fn from_index(index: LanaiIndex<D>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Stores `data` under `pattern`.
    pub fn add(&self, pattern: &Value, data: D) -> LanaiIndexResult<()> {
        self.inner.write().add(pattern, data).map(|_| ())
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every pattern.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Runs `f` with shared access to the underlying index.
    pub fn with_index<R>(&self, f: impl FnOnce(&LanaiIndex<D>) -> R) -> R {
        f(&self.inner.read())
    }
}

impl<D: Clone> SharedLanaiIndex<D> {
    /// Returns owned copies of every match for `query`, ranked.
    pub fn matches(&self, query: &Value) -> Vec<SharedMatch<D>> {
        let index = self.inner.read();
        index.matches(query).into_iter().map(SharedMatch::from).collect()
    }

    /// Returns owned copies of the payloads matching `query`, ranked.
    pub fn match_data(&self, query: &Value) -> Vec<D> {
        let index = self.inner.read();
        index.match_data(query).into_iter().cloned().collect()
    }

    /// Returns the most recently added payload stored under exactly `pattern`.
    pub fn get(&self, pattern: &Value) -> Option<D> {
        self.inner.read().get(pattern).cloned()
    }

    /// Returns every payload stored under exactly `pattern`, oldest first.
    pub fn get_all(&self, pattern: &Value) -> Vec<D> {
        let index = self.inner.read();
        index.get_all(pattern).into_iter().cloned().collect()
    }
}

impl<D: PartialEq> SharedLanaiIndex<D> {
    /// Removes payloads stored under exactly `pattern`; see [`LanaiIndex::remove`].
    pub fn remove(&self, pattern: &Value, data: Option<&D>) -> usize {
        self.inner.write().remove(pattern, data)
    }
}

impl<D> Default for SharedLanaiIndex<D> {
    fn default() -> Self {
        Self::new()
    }
}
