// Copyright (c) 2025 - Cowboy AI, Inc.
//! Selector Matcher
//!
//! Evaluates a [`LabelSelector`] against a label set. Evaluation is pure and
//! happens in two steps:
//!
//! 1. [`compile`] checks the selector's structure and turns every term into a
//!    typed [`Requirement`]. A malformed selector fails here with a
//!    [`StructuralError`], never with a silent "no match".
//! 2. [`CompiledSelector::matches`] evaluates the requirements against a label
//!    set. All requirements must hold; no requirements selects everything.
//!
//! For a key missing from the label set: `Exists`, `In` and `Equals` do not
//! match, while `DoesNotExist`, `NotIn` and `NotEquals` do.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::domain::{LabelSelector, LabelSelectorRequirement, Labels, SelectorOperator};

/// A selector expression the matcher cannot evaluate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("{0:?} is not a valid label selector operator")]
    UnknownOperator(String),

    #[error("label selector requirement has an empty key")]
    EmptyKey,

    #[error("values for key {key:?} with operator {operator} must not be empty")]
    EmptyValues {
        key: String,
        operator: SelectorOperator,
    },

    #[error("values for key {key:?} with operator {operator} must be empty")]
    UnexpectedValues {
        key: String,
        operator: SelectorOperator,
    },

    #[error("operator {operator} on key {key:?} requires exactly one value, got {count}")]
    SingleValueRequired {
        key: String,
        operator: SelectorOperator,
        count: usize,
    },
}

/// One checked selector term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    In { key: String, values: BTreeSet<String> },
    NotIn { key: String, values: BTreeSet<String> },
    Exists { key: String },
    DoesNotExist { key: String },
    Equals { key: String, value: String },
    NotEquals { key: String, value: String },
}

impl Requirement {
    fn compile(req: &LabelSelectorRequirement) -> Result<Self, StructuralError> {
        let operator = req.parsed_operator()?;
        let key = req.key.clone();
        if key.is_empty() {
            return Err(StructuralError::EmptyKey);
        }

        match operator {
            SelectorOperator::In | SelectorOperator::NotIn => {
                if req.values.is_empty() {
                    return Err(StructuralError::EmptyValues { key, operator });
                }
                let values = req.values.iter().cloned().collect();
                Ok(if operator == SelectorOperator::In {
                    Self::In { key, values }
                } else {
                    Self::NotIn { key, values }
                })
            }
            SelectorOperator::Exists | SelectorOperator::DoesNotExist => {
                if !req.values.is_empty() {
                    return Err(StructuralError::UnexpectedValues { key, operator });
                }
                Ok(if operator == SelectorOperator::Exists {
                    Self::Exists { key }
                } else {
                    Self::DoesNotExist { key }
                })
            }
            SelectorOperator::Equals | SelectorOperator::NotEquals => {
                let [value] = req.values.as_slice() else {
                    return Err(StructuralError::SingleValueRequired {
                        key,
                        operator,
                        count: req.values.len(),
                    });
                };
                let value = value.clone();
                Ok(if operator == SelectorOperator::Equals {
                    Self::Equals { key, value }
                } else {
                    Self::NotEquals { key, value }
                })
            }
        }
    }

    /// Evaluate this term against a label set
    pub fn matches(&self, labels: &Labels) -> bool {
        match self {
            Self::In { key, values } => labels.get(key).is_some_and(|v| values.contains(v)),
            Self::NotIn { key, values } => labels.get(key).map_or(true, |v| !values.contains(v)),
            Self::Exists { key } => labels.contains_key(key),
            Self::DoesNotExist { key } => !labels.contains_key(key),
            Self::Equals { key, value } => labels.get(key) == Some(value),
            Self::NotEquals { key, value } => labels.get(key) != Some(value),
        }
    }
}

/// A structurally valid selector, ready for evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSelector {
    requirements: Vec<Requirement>,
}

impl CompiledSelector {
    /// True when the label set satisfies every requirement
    pub fn matches(&self, labels: &Labels) -> bool {
        self.requirements.iter().all(|req| req.matches(labels))
    }

    /// True when the selector selects everything
    pub fn is_everything(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }
}

/// Check a selector's structure and compile it for evaluation
pub fn compile(selector: &LabelSelector) -> Result<CompiledSelector, StructuralError> {
    let mut requirements = Vec::with_capacity(
        selector.match_labels.len() + selector.match_expressions.len(),
    );

    for (key, value) in &selector.match_labels {
        if key.is_empty() {
            return Err(StructuralError::EmptyKey);
        }
        requirements.push(Requirement::Equals {
            key: key.clone(),
            value: value.clone(),
        });
    }

    for req in &selector.match_expressions {
        requirements.push(Requirement::compile(req)?);
    }

    Ok(CompiledSelector { requirements })
}

/// Check a selector's structure without evaluating it
pub fn validate_selector(selector: &LabelSelector) -> Result<(), StructuralError> {
    compile(selector).map(|_| ())
}

/// Evaluate a selector against a label set
///
/// Returns a [`StructuralError`] if the selector is malformed, regardless of
/// the labels.
pub fn matches(selector: &LabelSelector, labels: &Labels) -> Result<bool, StructuralError> {
    Ok(compile(selector)?.matches(labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn expr(key: &str, operator: SelectorOperator, values: &[&str]) -> LabelSelector {
        LabelSelector::new().with_expression(LabelSelectorRequirement::new(
            key,
            operator,
            values.iter().copied(),
        ))
    }

    #[test]
    fn test_empty_selector_matches_everything() {
        let selector = LabelSelector::new();
        assert!(matches(&selector, &Labels::new()).unwrap());
        assert!(matches(&selector, &labels(&[("a", "b")])).unwrap());
        assert!(compile(&selector).unwrap().is_everything());
    }

    #[test]
    fn test_match_labels_are_anded() {
        let selector = LabelSelector::from_match_labels([("l2", "b"), ("l2a", "c")]);
        assert!(matches(&selector, &labels(&[("l2", "b"), ("l2a", "c")])).unwrap());
        assert!(!matches(&selector, &labels(&[("l2", "b")])).unwrap());
    }

    #[test_case(SelectorOperator::Exists, &[], false ; "exists")]
    #[test_case(SelectorOperator::DoesNotExist, &[], true ; "does not exist")]
    #[test_case(SelectorOperator::Equals, &["a"], false ; "equals")]
    #[test_case(SelectorOperator::NotEquals, &["a"], true ; "not equals")]
    #[test_case(SelectorOperator::In, &["a", "b"], false ; "in")]
    #[test_case(SelectorOperator::NotIn, &["a", "b"], true ; "not in")]
    fn test_absent_key(operator: SelectorOperator, values: &[&str], expected: bool) {
        let selector = expr("missing", operator, values);
        assert_eq!(matches(&selector, &labels(&[("other", "a")])).unwrap(), expected);
    }

    #[test_case(SelectorOperator::Exists, &[], true ; "exists")]
    #[test_case(SelectorOperator::DoesNotExist, &[], false ; "does not exist")]
    #[test_case(SelectorOperator::Equals, &["a"], true ; "equals")]
    #[test_case(SelectorOperator::NotEquals, &["a"], false ; "not equals")]
    #[test_case(SelectorOperator::In, &["a", "b"], true ; "in")]
    #[test_case(SelectorOperator::NotIn, &["a", "b"], false ; "not in")]
    fn test_present_key(operator: SelectorOperator, values: &[&str], expected: bool) {
        let selector = expr("key", operator, values);
        assert_eq!(matches(&selector, &labels(&[("key", "a")])).unwrap(), expected);
    }

    #[test]
    fn test_unknown_operator_is_structural_error() {
        let selector = LabelSelector::new().with_expression(LabelSelectorRequirement {
            key: "test".to_string(),
            operator: "bad-operator".to_string(),
            values: vec!["test".to_string()],
        });

        let err = matches(&selector, &labels(&[("test", "test")])).unwrap_err();
        assert_eq!(err, StructuralError::UnknownOperator("bad-operator".to_string()));
        assert!(err.to_string().contains("not a valid label selector operator"));
    }

    #[test_case(expr("k", SelectorOperator::In, &[]) ; "in without values")]
    #[test_case(expr("k", SelectorOperator::NotIn, &[]) ; "notin without values")]
    #[test_case(expr("k", SelectorOperator::Exists, &["v"]) ; "exists with values")]
    #[test_case(expr("k", SelectorOperator::DoesNotExist, &["v"]) ; "does not exist with values")]
    #[test_case(expr("k", SelectorOperator::Equals, &["a", "b"]) ; "equals with two values")]
    #[test_case(expr("k", SelectorOperator::NotEquals, &[]) ; "not equals without value")]
    #[test_case(expr("", SelectorOperator::Exists, &[]) ; "empty key")]
    #[test_case(LabelSelector::from_match_labels([("", "v")]) ; "empty match label key")]
    fn test_malformed_selectors(selector: LabelSelector) {
        assert!(validate_selector(&selector).is_err());
        assert!(matches(&selector, &Labels::new()).is_err());
    }

    #[test]
    fn test_compiled_selector_is_reusable() {
        let compiled = compile(&LabelSelector::from_match_labels([("l3", "d")])).unwrap();
        assert_eq!(compiled.requirements().len(), 1);
        assert!(compiled.matches(&labels(&[("l3", "d")])));
        assert!(!compiled.matches(&labels(&[("l3", "e")])));
        assert!(compiled.matches(&labels(&[("l3", "d"), ("x", "y")])));
    }
}
