// Copyright (c) 2025 - Cowboy AI, Inc.
//! Label Selector Value Objects
//!
//! A [`LabelSelector`] combines equality match-labels with set-based
//! requirements. All terms are ANDed together; an empty selector selects
//! everything.
//!
//! Operators are kept as raw strings on [`LabelSelectorRequirement`] so that a
//! document naming an unknown operator still deserializes. The operator is
//! checked when the selector is compiled by [`crate::matcher`], where an
//! unknown operator becomes a structural error instead of a "no match".
//!
//! # Canonical Form
//!
//! `Display` renders a canonical string used in error messages:
//!
//! | Term                      | Rendering        |
//! |---------------------------|------------------|
//! | match label / `Equals`    | `key=value`      |
//! | `NotEquals`               | `key!=value`     |
//! | `In`                      | `key in (a,b)`   |
//! | `NotIn`                   | `key notin (a,b)`|
//! | `Exists`                  | `key`            |
//! | `DoesNotExist`            | `!key`           |
//!
//! Terms are sorted by key, values inside a set are sorted, and identical terms
//! collapse, so `{tier: gold}` as a match label and `tier Equals [gold]` as an
//! expression render the same.
//!
//! The rendering is not injective: keys and values are free text, so `!gpu`
//! may be a `DoesNotExist` on `gpu` or an `Exists` on `!gpu`. Selector
//! identity is therefore [`SelectorKey`], the normalized set of structured
//! terms.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::Labels;
use crate::matcher::StructuralError;

/// Set-based selector operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
    Equals,
    NotEquals,
}

impl SelectorOperator {
    /// All operators accepted by the matcher
    pub const ALL: [SelectorOperator; 6] = [
        Self::In,
        Self::NotIn,
        Self::Exists,
        Self::DoesNotExist,
        Self::Equals,
        Self::NotEquals,
    ];

    /// Get the wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "In",
            Self::NotIn => "NotIn",
            Self::Exists => "Exists",
            Self::DoesNotExist => "DoesNotExist",
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
        }
    }
}

impl fmt::Display for SelectorOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SelectorOperator {
    type Err = StructuralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| StructuralError::UnknownOperator(s.to_string()))
    }
}

/// A single set-based requirement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    /// Label key the requirement applies to
    pub key: String,

    /// Operator name, see [`SelectorOperator`]
    pub operator: String,

    /// Values for set and equality operators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl LabelSelectorRequirement {
    pub fn new<I, V>(key: impl Into<String>, operator: SelectorOperator, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            operator: operator.as_str().to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists(key: impl Into<String>) -> Self {
        Self::new(key, SelectorOperator::Exists, Vec::<String>::new())
    }

    pub fn does_not_exist(key: impl Into<String>) -> Self {
        Self::new(key, SelectorOperator::DoesNotExist, Vec::<String>::new())
    }

    /// Parse the operator name
    pub fn parsed_operator(&self) -> Result<SelectorOperator, StructuralError> {
        self.operator.parse()
    }

    fn canonical(&self) -> String {
        let mut values = self.values.clone();
        values.sort();
        values.dedup();
        let joined = values.join(",");

        match self.parsed_operator() {
            Ok(SelectorOperator::In) => format!("{} in ({})", self.key, joined),
            Ok(SelectorOperator::NotIn) => format!("{} notin ({})", self.key, joined),
            Ok(SelectorOperator::Exists) => self.key.clone(),
            Ok(SelectorOperator::DoesNotExist) => format!("!{}", self.key),
            Ok(SelectorOperator::Equals) => format!("{}={}", self.key, joined),
            Ok(SelectorOperator::NotEquals) => format!("{}!={}", self.key, joined),
            Err(_) => format!("{} {} ({})", self.key, self.operator, joined),
        }
    }
}

/// Label selector expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Equality terms, each equivalent to an `Equals` requirement
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub match_labels: Labels,

    /// Set-based requirements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_expressions: Vec<LabelSelectorRequirement>,
}

impl LabelSelector {
    /// Create an empty selector, which selects everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector from equality terms only
    pub fn from_match_labels<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            match_labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            match_expressions: Vec::new(),
        }
    }

    pub fn with_match_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.match_labels.insert(key.into(), value.into());
        self
    }

    pub fn with_expression(mut self, requirement: LabelSelectorRequirement) -> Self {
        self.match_expressions.push(requirement);
        self
    }

    /// True when the selector has no terms at all
    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty() && self.match_expressions.is_empty()
    }

    /// Canonical string form, identical for semantically identical term sets
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Structured identity of the selector
    ///
    /// Match labels count as `Equals` terms; term order and repeated values
    /// are ignored. Unknown operators keep their raw name.
    pub fn key(&self) -> SelectorKey {
        let equals = SelectorOperator::Equals.as_str();
        let labels = self
            .match_labels
            .iter()
            .map(|(k, v)| (k.clone(), equals.to_string(), BTreeSet::from([v.clone()])));
        let expressions = self.match_expressions.iter().map(|req| {
            (
                req.key.clone(),
                req.operator.clone(),
                req.values.iter().cloned().collect(),
            )
        });

        SelectorKey(labels.chain(expressions).collect())
    }
}

/// Normalized `(key, operator, values)` terms of a [`LabelSelector`]
///
/// Equal exactly when two selectors carry the same terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectorKey(BTreeSet<(String, String, BTreeSet<String>)>);

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms: Vec<(&str, String)> = self
            .match_labels
            .iter()
            .map(|(k, v)| (k.as_str(), format!("{}={}", k, v)))
            .chain(
                self.match_expressions
                    .iter()
                    .map(|req| (req.key.as_str(), req.canonical())),
            )
            .collect();
        terms.sort();
        terms.dedup();

        let rendered: Vec<String> = terms.into_iter().map(|(_, term)| term).collect();
        write!(f, "{}", rendered.join(","))
    }
}
