// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Subset search of a query against the pattern trie.
//!
//! The search walks the query's sorted fields. At every field it may either
//! consume the field, descending into the trie along the field's key and
//! value, or skip it and stay on the current node. Exploring both choices
//! finds every stored pattern whose fields are a subset of the query's.
//!
//! Nested containers are entered through [`Label::NestBegin`]. The fields the
//! enclosing level still has to look at are kept in a [`Frame`]; frames form a
//! stack linked through the call chain, pushed on entry and popped when the
//! nested level reaches its [`Label::NestEnd`] branch.

use std::cmp::Ordering;

use serde_json::Value;

use super::canonical::{scalar_text, Canonical, Field, Shape};
use super::label::Label;
use super::node::TrieNode;
use super::signature::Signature;

/// A stored pattern that matched a query.
#[derive(Debug, PartialEq)]
pub struct PatternMatch<'a, D> {
    /// Payload stored with the pattern
    pub data: &'a D,

    /// Number of matching steps taken to reach the pattern; higher is more specific
    pub specificity: usize,

    /// Position of the `add` call that stored the payload
    pub insertion_index: u64,

    /// Signature of the matched pattern
    pub signature: &'a Signature,
}

impl<D> Clone for PatternMatch<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for PatternMatch<'_, D> {}

/// Continuation of an enclosing level while a nested value is searched.
struct Frame<'c, 'q> {
    rest: &'c [Field<'q>],
    parent: Option<&'c Frame<'c, 'q>>,
}

struct Matcher<'t, D> {
    matches: Vec<PatternMatch<'t, D>>,
}

impl<'t, D> Matcher<'t, D> {
    fn collect(&mut self, node: &'t TrieNode<D>, specificity: usize) {
        self.matches.extend(node.entries.iter().map(|entry| PatternMatch {
            data: &entry.data,
            specificity,
            insertion_index: entry.insertion_index,
            signature: &entry.signature,
        }));
    }

    fn climb<'q>(
        &mut self,
        trunk: &'t TrieNode<D>,
        fields: &[Field<'q>],
        outer: Option<&Frame<'_, 'q>>,
        depth: usize,
    ) {
        // Consuming fields[i] means every field before it was skipped
        for (i, field) in fields.iter().enumerate() {
            let Some(kbranch) = trunk.child(&field.key) else {
                continue;
            };
            let rest = &fields[i + 1..];

            // A stored wildcard takes any value, containers included, and
            // shadows every other branch of the key
            if let Some(wild) = kbranch.child(&Label::Wildcard) {
                self.collect(wild, depth);
                self.climb(wild, rest, outer, depth + 1);
                continue;
            }

            if field.shape.is_container() {
                let Some(begin) = kbranch.child(&Label::NestBegin) else {
                    continue;
                };

                let nested = Canonical::of(field.value);
                let start = match nested.shape {
                    Shape::Array => match begin.child(&Label::ArrayRoot) {
                        Some(node) => node,
                        None => continue,
                    },
                    _ => begin,
                };

                self.collect(start, depth);
                let frame = Frame { rest, parent: outer };
                self.climb(start, &nested.fields, Some(&frame), depth + 1);
                continue;
            }

            if let Some(vbranch) = kbranch.child(&Label::Value(scalar_text(field.value))) {
                self.collect(vbranch, depth);
                self.climb(vbranch, rest, outer, depth + 1);
            }
        }

        // Every field of this level is used up; step back out of a nested value
        if let Some(frame) = outer {
            if let Some(end) = trunk.child(&Label::NestEnd) {
                self.collect(end, depth);
                self.climb(end, frame.rest, frame.parent, depth + 1);
            }
        }
    }
}

/// Collects every stored pattern that is a subset of `query`, unranked.
pub(crate) fn search<'t, D>(root: &'t TrieNode<D>, query: &Value) -> Vec<PatternMatch<'t, D>> {
    let canonical = Canonical::of(query);
    let mut matcher = Matcher {
        matches: Vec::new(),
    };

    let start = match canonical.shape {
        Shape::Array => match root.child(&Label::ArrayRoot) {
            Some(node) => node,
            // No array pattern was ever stored
            None => return matcher.matches,
        },
        _ => root,
    };

    // The empty container pattern matches any container query of its kind
    if canonical.shape.is_container() {
        matcher.collect(start, 0);
    }

    matcher.climb(start, &canonical.fields, None, 1);
    matcher.matches
}

/// Orders matches by specificity, most specific first, then by insertion.
pub(crate) fn rank<D>(matches: &mut [PatternMatch<'_, D>]) {
    matches.sort_by(|a, b| match b.specificity.cmp(&a.specificity) {
        Ordering::Equal => a.insertion_index.cmp(&b.insertion_index),
        other => other,
    });
}
