// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Group Validator
//!
//! Structural checks over the declared node group list, in isolation from any
//! pool data. Rules run in a fixed order and the first failing rule wins:
//!
//! 1. **Selector exclusivity**: each node group populates exactly one strategy
//! 2. **Selector duplication**: no two node groups share a pool name, a pool
//!    selector, or a node selector; selectors are compared by
//!    [`SelectorKey`](crate::domain::SelectorKey), and pool and node selectors
//!    never collide with each other since they match different label universes
//! 3. **Selector well-formedness**: every selector compiles
//! 4. **Name hygiene**: explicit names are non-empty and whitespace-free
//! 5. **Name uniqueness**: explicit names are unique
//!
//! Within one rule every violation is collected, so a single pass reports all
//! the problems of that kind.

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::domain::node_group::exclusivity_message;
use crate::domain::{NodeGroup, NodeGroupSpec};
use crate::matcher;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// A rule violated by the declared node groups
///
/// Each variant carries every violation of its rule; `Display` joins them
/// with `"; "`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", .0.join("; "))]
    SelectorExclusivity(Vec<String>),

    #[error("{}", .0.join("; "))]
    DuplicateSelectors(Vec<String>),

    #[error("{}", .0.join("; "))]
    MalformedSelectors(Vec<String>),

    #[error("{}", .0.join("; "))]
    InvalidNames(Vec<String>),

    #[error("{}", .0.join("; "))]
    DuplicateNames(Vec<String>),
}

impl ValidationError {
    /// Every individual violation
    pub fn violations(&self) -> &[String] {
        match self {
            Self::SelectorExclusivity(v)
            | Self::DuplicateSelectors(v)
            | Self::MalformedSelectors(v)
            | Self::InvalidNames(v)
            | Self::DuplicateNames(v) => v,
        }
    }
}

/// Validate the declared node groups
pub fn validate_node_groups(node_groups: &[NodeGroup]) -> ValidationResult {
    selector_exclusivity(node_groups)?;
    duplicate_selectors(node_groups)?;
    selector_well_formedness(node_groups)?;
    name_hygiene(node_groups)?;
    name_uniqueness(node_groups)?;

    debug!("Validated {} node groups", node_groups.len());
    Ok(())
}

/// Validate the declared node groups and convert them to typed specs
pub fn validated_specs(node_groups: &[NodeGroup]) -> Result<Vec<NodeGroupSpec>, ValidationError> {
    validate_node_groups(node_groups)?;
    node_groups
        .iter()
        .cloned()
        .map(NodeGroupSpec::try_from)
        .collect()
}

fn fail_on(violations: Vec<String>, into: fn(Vec<String>) -> ValidationError) -> ValidationResult {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(into(violations))
    }
}

fn selector_exclusivity(node_groups: &[NodeGroup]) -> ValidationResult {
    let violations = node_groups
        .iter()
        .enumerate()
        .filter(|(_, ng)| ng.strategy_count() != 1)
        .map(|(idx, ng)| {
            format!(
                "{} (node group at index {})",
                exclusivity_message(ng.strategy_count()),
                idx
            )
        })
        .collect();

    fail_on(violations, ValidationError::SelectorExclusivity)
}

fn duplicate_selectors(node_groups: &[NodeGroup]) -> ValidationResult {
    let pool_names = node_groups
        .iter()
        .filter_map(|ng| ng.pool_name.as_deref())
        .map(|name| (name, name.to_string()));
    let pool_selectors = node_groups
        .iter()
        .filter_map(|ng| ng.pool_selector.as_ref())
        .map(|sel| (sel.key(), sel.canonical()));
    let node_selectors = node_groups
        .iter()
        .filter_map(|ng| ng.node_selector.as_ref())
        .map(|sel| (sel.key(), sel.canonical()));

    let mut violations = duplicated(pool_names, "pool name");
    violations.extend(duplicated(pool_selectors, "pool selector"));
    violations.extend(duplicated(node_selectors, "node selector"));

    fail_on(violations, ValidationError::DuplicateSelectors)
}

/// Report every key seen more than once, shown by its first rendering
fn duplicated<K: Ord>(keys: impl Iterator<Item = (K, String)>, strategy: &str) -> Vec<String> {
    let mut counts: BTreeMap<K, (String, usize)> = BTreeMap::new();
    for (key, shown) in keys {
        counts.entry(key).or_insert((shown, 0)).1 += 1;
    }

    counts
        .into_values()
        .filter(|(_, count)| *count > 1)
        .map(|(shown, _)| {
            format!("the node group with the {} {:?} has duplicates", strategy, shown)
        })
        .collect()
}

fn selector_well_formedness(node_groups: &[NodeGroup]) -> ValidationResult {
    let mut violations = Vec::new();

    for (idx, ng) in node_groups.iter().enumerate() {
        let declared = [("pool selector", &ng.pool_selector), ("node selector", &ng.node_selector)];
        for (strategy, selector) in declared {
            let Some(selector) = selector else {
                continue;
            };
            if let Err(err) = matcher::validate_selector(selector) {
                violations.push(format!(
                    "node group at index {} has a bad {} {:?}: {}",
                    idx,
                    strategy,
                    selector.canonical(),
                    err
                ));
            }
        }
    }

    fail_on(violations, ValidationError::MalformedSelectors)
}

fn name_hygiene(node_groups: &[NodeGroup]) -> ValidationResult {
    let violations = node_groups
        .iter()
        .filter_map(|ng| ng.name.as_deref())
        .filter(|name| name.is_empty() || name.chars().any(char::is_whitespace))
        .map(|name| format!("node group name should not contain spaces or be empty: {:?}", name))
        .collect();

    fail_on(violations, ValidationError::InvalidNames)
}

fn name_uniqueness(node_groups: &[NodeGroup]) -> ValidationResult {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in node_groups.iter().filter_map(|ng| ng.name.as_deref()) {
        *counts.entry(name).or_default() += 1;
    }

    let violations = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| format!("multiple node groups with same name {:?}", name))
        .collect();

    fail_on(violations, ValidationError::DuplicateNames)
}
