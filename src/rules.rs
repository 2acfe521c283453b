//! Rule files for the pattern index.
//!
//! A rule file is a JSON array of `{"pattern": ..., "data": ...}` objects.
//! Loading one adds every rule to a fresh [`LanaiIndex`] in document order,
//! so later rules win ties against earlier ones in `get`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_structures::lanai_index::{LanaiIndex, LanaiIndexConfig};
use crate::error::rules::RuleError;

/// One pattern together with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Pattern to index
    pub pattern: Value,

    /// Payload returned when the pattern matches
    #[serde(default)]
    pub data: Value,
}

/// An ordered list of rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parses a rule set from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a rule file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RuleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), rules = rules.len(), "rule file parsed");
        Ok(rules)
    }

    /// Returns the rules in document order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds an index holding every rule.
    ///
    /// Fails on the first rule the index rejects.
    pub fn build_index(&self, config: LanaiIndexConfig) -> Result<LanaiIndex<Value>, RuleError> {
        let mut index = LanaiIndex::with_config(config).map_err(RuleError::InvalidConfig)?;

        for (position, rule) in self.rules.iter().enumerate() {
            index
                .add(&rule.pattern, rule.data.clone())
                .map_err(|source| RuleError::Rejected { position, source })?;
        }
        Ok(index)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::lanai_index::LanaiIndexError;
    use serde_json::json;

    const RULES: &str = r#"[
        {"pattern": {"type": "order"}, "data": "orders"},
        {"pattern": {"type": "order", "region": "eu"}, "data": {"queue": "eu"}},
        {"pattern": "ping"}
    ]"#;

    #[test]
    fn test_parse_rules() {
        let rules = RuleSet::from_json(RULES).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.rules()[1].data, json!({"queue": "eu"}));
        // Missing data defaults to null
        assert_eq!(rules.rules()[2].data, Value::Null);
    }

    #[test]
    fn test_build_index() {
        let index = RuleSet::from_json(RULES)
            .unwrap()
            .build_index(LanaiIndexConfig::default())
            .unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(
            index.match_data(&json!({"type": "order", "region": "eu"})),
            vec![&json!({"queue": "eu"}), &json!("orders")]
        );
        assert_eq!(index.get(&json!("ping")), Some(&Value::Null));
    }

    #[test]
    fn test_rejected_rule_reports_position() {
        let rules: RuleSet = vec![
            Rule {
                pattern: json!({"a": 1}),
                data: json!(1),
            },
            Rule {
                pattern: json!({"a": {"b": {"c": 1}}}),
                data: json!(2),
            },
        ]
        .into_iter()
        .collect();

        let err = rules
            .build_index(LanaiIndexConfig::new().with_max_depth(2))
            .unwrap_err();
        match err {
            RuleError::Rejected { position, source } => {
                assert_eq!(position, 1);
                assert!(matches!(source, LanaiIndexError::PatternTooDeep { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_rules() {
        assert!(matches!(RuleSet::from_json("{}"), Err(RuleError::Parse(_))));
        assert!(matches!(
            RuleSet::from_json(r#"[{"data": 1}]"#),
            Err(RuleError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = RuleSet::from_path("/nonexistent/lanai/rules.json").unwrap_err();
        assert!(matches!(err, RuleError::Read { .. }));
    }
}
