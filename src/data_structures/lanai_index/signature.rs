// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Exact identity of a stored pattern.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Canonical serialized form of a pattern as the caller supplied it.
///
/// The encoding is JSON with object keys in sorted order, so two patterns
/// that differ only in key insertion order share a signature while `1` and
/// `"1"` do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// Computes the signature of `pattern`.
    pub fn of(pattern: &Value) -> Self {
        let mut out = String::new();
        encode(pattern, &mut out);
        Self(out)
    }

    /// Returns the encoded signature.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn encode(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // serde_json keeps insertion order when any crate in the build enables `preserve_order`
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                encode(item, out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
