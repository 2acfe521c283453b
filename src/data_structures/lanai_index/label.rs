// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Edge labels of the Lanai pattern trie.

use std::fmt;

/// Label on the edge between a trie node and one of its children.
///
/// Structural markers are their own variants, so no object key or scalar
/// value supplied by a caller can ever collide with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Object property name, or array index rendered in decimal.
    Key(String),

    /// Stringified scalar value.
    Value(String),

    /// Matches any value at this position, containers included.
    Wildcard,

    /// Entry into a nested object or array value.
    NestBegin,

    /// Return from a nested value to the enclosing level.
    NestEnd,

    /// Root of an array pattern.
    ArrayRoot,

    /// Synthetic key under which a non-container pattern is stored.
    Scalar,
}

impl Label {
    /// Returns `true` for the structural marker variants.
    pub fn is_marker(&self) -> bool {
        !matches!(self, Label::Key(_) | Label::Value(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Key(key) => write!(f, "{key}"),
            Label::Value(value) => write!(f, "={value}"),
            Label::Wildcard => f.write_str("=*"),
            Label::NestBegin => f.write_str("{"),
            Label::NestEnd => f.write_str("}"),
            Label::ArrayRoot => f.write_str("[]"),
            Label::Scalar => f.write_str("$"),
        }
    }
}
