// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cross-Tree Validator
//!
//! Global checks over a complete set of resolved trees. A pool belongs to at
//! most one node group; [`check_duplicates`] rejects any pool name bound more
//! than once. [`flatten`] is a plain projection of all bound pools and trusts
//! its caller to have run the check first.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::PoolRef;
use crate::tree::Tree;

/// Pools claimed by more than one node group
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossTreeError {
    /// Duplicated pool names, sorted
    #[error("{}", render_duplicates(.0))]
    DuplicatePools(Vec<String>),
}

fn render_duplicates(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("the pool {:?} selected by at least two node groups", name))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reject pool names that are bound more than once across all trees
pub fn check_duplicates(trees: &[Tree<'_>]) -> Result<(), CrossTreeError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for pool in trees.iter().flat_map(|tree| tree.pools.iter()) {
        *counts.entry(pool.name.as_str()).or_default() += 1;
    }

    let duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(CrossTreeError::DuplicatePools(duplicates))
    }
}

/// All bound pools, tree by tree in input order, duplicates kept
pub fn flatten<'a>(trees: &[Tree<'a>]) -> Vec<&'a PoolRef> {
    trees
        .iter()
        .flat_map(|tree| tree.pools.iter().copied())
        .collect()
}
