// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Canonical form of patterns and queries.
//!
//! Every pattern is reduced to a list of fields sorted by key. Scalars are
//! wrapped under [`Label::Scalar`] and arrays use their indices as keys, so the
//! matcher and the inserter only ever deal with keyed fields.

use serde_json::Value;

use super::error::LanaiIndexError;
use super::label::Label;

/// Kind of a JSON value, decided once when a field is canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Scalar,
    Array,
    Object,
}

impl Shape {
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Shape::Array,
            Value::Object(_) => Shape::Object,
            _ => Shape::Scalar,
        }
    }

    pub(crate) fn is_container(self) -> bool {
        self != Shape::Scalar
    }
}

/// One key/value pair of a canonical pattern.
#[derive(Debug, Clone)]
pub(crate) struct Field<'a> {
    pub key: Label,
    pub value: &'a Value,
    pub shape: Shape,
}

/// Sorted fields of a pattern, together with the shape of the pattern itself.
#[derive(Debug, Clone)]
pub(crate) struct Canonical<'a> {
    pub shape: Shape,
    pub fields: Vec<Field<'a>>,
}

impl<'a> Canonical<'a> {
    pub(crate) fn of(pattern: &'a Value) -> Self {
        let shape = Shape::of(pattern);
        let mut fields: Vec<(String, &'a Value)> = match pattern {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            scalar => {
                return Self {
                    shape,
                    fields: vec![Field {
                        key: Label::Scalar,
                        value: scalar,
                        shape: Shape::Scalar,
                    }],
                }
            }
        };

        // Array indices sort as strings too: "10" comes before "2"
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            shape,
            fields: fields
                .into_iter()
                .map(|(key, value)| Field {
                    key: Label::Key(key),
                    value,
                    shape: Shape::of(value),
                })
                .collect(),
        }
    }
}

/// Largest magnitude below which every integral `f64` converts to `i64` exactly.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Renders a scalar the way it is stored in a [`Label::Value`].
///
/// Strings are taken verbatim; booleans, null and numbers use their JSON
/// text, except that integral floats drop the fraction so `1.0` and `1`
/// share a label.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < EXACT_INTEGER_LIMIT => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Builds the label a stored scalar value is filed under.
pub(crate) fn value_label(value: &Value, wildcard: &str) -> Label {
    match value {
        Value::String(s) if s == wildcard => Label::Wildcard,
        other => Label::Value(scalar_text(other)),
    }
}

/// Flattens a pattern into the linear label path it occupies in the trie.
///
/// Nested containers are bracketed by [`Label::NestBegin`] and
/// [`Label::NestEnd`]. Nesting is walked with an explicit stack of field
/// iterators, one per open level.
pub(crate) fn canonical_path(
    pattern: &Value,
    wildcard: &str,
    max_depth: usize,
) -> Result<Vec<Label>, LanaiIndexError> {
    let root = Canonical::of(pattern);
    let mut path = Vec::with_capacity(root.fields.len() * 2 + 1);
    if root.shape == Shape::Array {
        path.push(Label::ArrayRoot);
    }

    let mut stack = vec![root.fields.into_iter()];
    loop {
        let Some(frame) = stack.last_mut() else {
            break;
        };

        let Some(field) = frame.next() else {
            stack.pop();
            if !stack.is_empty() {
                path.push(Label::NestEnd);
            }
            continue;
        };

        path.push(field.key);
        if !field.shape.is_container() {
            path.push(value_label(field.value, wildcard));
            continue;
        }

        if stack.len() >= max_depth {
            return Err(LanaiIndexError::PatternTooDeep {
                depth: stack.len() + 1,
                max_depth,
            });
        }

        path.push(Label::NestBegin);
        let nested = Canonical::of(field.value);
        if nested.shape == Shape::Array {
            path.push(Label::ArrayRoot);
        }
        stack.push(nested.fields.into_iter());
    }

    Ok(path)
}
