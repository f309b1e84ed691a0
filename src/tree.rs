// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tree Resolver
//!
//! Binds every node group to the pool(s) it selects, producing one [`Tree`] per
//! node group in input order. Resolution is all-or-nothing: the first node
//! group that cannot be bound fails the whole call and no trees are returned.
//!
//! # Strategies
//!
//! | Strategy                | Standard profile                 | Hosted profile                   |
//! |-------------------------|----------------------------------|----------------------------------|
//! | `ByPoolName(n)`         | exactly one pool named `n`       | node selector `{pool-label: n}`  |
//! | `ByPoolLabelSelector`   | pools whose labels match         | unsupported                      |
//! | `ByNodeLabelSelector`   | node selector, no pool lookup    | node selector, no pool lookup    |
//!
//! A pool selector must match at least one pool. Unless the policy allows
//! multiple pools per tree, it must also match at most one.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{DeploymentProfile, ResolutionPolicy};
use crate::cross_tree::flatten;
use crate::domain::{LabelSelector, NodeGroupSpec, PoolRef, Selector};
use crate::matcher::{self, StructuralError};

/// A node group could not be bound to pools
///
/// `node_group` is the quoted explicit name, or `#<index>` for unnamed groups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("node group {node_group}: no pool found for name {pool_name:?}")]
    PoolNameNotFound {
        node_group: String,
        pool_name: String,
    },

    #[error("node group {node_group}: pool name {pool_name:?} points to more than one pool: {count}")]
    PoolNameAmbiguous {
        node_group: String,
        pool_name: String,
        count: usize,
    },

    #[error("node group {node_group}: failed to find a pool for the selector {selector:?}")]
    NoPoolMatched {
        node_group: String,
        selector: String,
    },

    #[error(
        "node group {node_group}: the selector {selector:?} matches more than one pool: {count} \
         (multiple pools per tree is disabled)"
    )]
    TooManyPools {
        node_group: String,
        selector: String,
        count: usize,
    },

    #[error("node group {node_group}: bad selector {selector:?}: {source}")]
    MalformedSelector {
        node_group: String,
        selector: String,
        source: StructuralError,
    },

    #[error("node group {node_group}: {strategy} is not supported by the {profile} deployment profile")]
    UnsupportedStrategy {
        node_group: String,
        strategy: &'static str,
        profile: DeploymentProfile,
    },
}

/// The resolved binding of one node group
///
/// The node group is owned by the tree; pools are borrowed from the caller's
/// candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree<'a> {
    /// Position of the node group in the input list
    pub index: usize,

    pub node_group: NodeGroupSpec,

    /// Bound pools, in candidate list order
    pub pools: Vec<&'a PoolRef>,

    /// Selector on machine labels, set when no pool lookup took place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<LabelSelector>,
}

impl<'a> Tree<'a> {
    pub fn pool_names(&self) -> Vec<&'a str> {
        self.pools.iter().map(|pool| pool.name.as_str()).collect()
    }

    /// Stable identity: explicit name, else the single bound pool, else the index
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.node_group.name {
            return name.clone();
        }
        match self.pools.as_slice() {
            [pool] => pool.name.clone(),
            _ => format!("#{}", self.index),
        }
    }
}

fn node_group_label(index: usize, spec: &NodeGroupSpec) -> String {
    match &spec.name {
        Some(name) => format!("{:?}", name),
        None => format!("#{}", index),
    }
}

/// Resolves node groups against a pool snapshot under one policy
#[derive(Debug, Clone, Default)]
pub struct TreeResolver {
    policy: ResolutionPolicy,
}

impl TreeResolver {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Resolve every node group, in input order
    ///
    /// Node groups are expected to have passed
    /// [`crate::validation::validate_node_groups`]; `pools` must be the full
    /// candidate list.
    pub fn resolve<'a>(
        &self,
        node_groups: &[NodeGroupSpec],
        pools: &'a [PoolRef],
    ) -> Result<Vec<Tree<'a>>, ResolutionError> {
        let trees = node_groups
            .iter()
            .enumerate()
            .map(|(index, spec)| self.resolve_one(index, spec, pools))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Resolved {} node groups against {} pools",
            trees.len(),
            pools.len()
        );
        Ok(trees)
    }

    /// Resolve, then flatten the bound pools into one list
    pub fn find_pools<'a>(
        &self,
        node_groups: &[NodeGroupSpec],
        pools: &'a [PoolRef],
    ) -> Result<Vec<&'a PoolRef>, ResolutionError> {
        let trees = self.resolve(node_groups, pools)?;
        Ok(flatten(&trees))
    }

    fn resolve_one<'a>(
        &self,
        index: usize,
        spec: &NodeGroupSpec,
        pools: &'a [PoolRef],
    ) -> Result<Tree<'a>, ResolutionError> {
        let tree = match (&spec.selector, self.policy.profile) {
            (Selector::ByPoolName(name), DeploymentProfile::Standard) => Tree {
                index,
                node_group: spec.clone(),
                pools: vec![self.pool_by_name(index, spec, name, pools)?],
                node_selector: None,
            },
            (Selector::ByPoolName(name), DeploymentProfile::Hosted) => Tree {
                index,
                node_group: spec.clone(),
                pools: Vec::new(),
                node_selector: Some(LabelSelector::from_match_labels([(
                    self.policy.hosted_pool_label.as_str(),
                    name.as_str(),
                )])),
            },
            (Selector::ByPoolLabelSelector(selector), DeploymentProfile::Standard) => Tree {
                index,
                node_group: spec.clone(),
                pools: self.pools_by_selector(index, spec, selector, pools)?,
                node_selector: None,
            },
            (Selector::ByPoolLabelSelector(_), profile @ DeploymentProfile::Hosted) => {
                return Err(ResolutionError::UnsupportedStrategy {
                    node_group: node_group_label(index, spec),
                    strategy: spec.selector.strategy(),
                    profile,
                });
            }
            (Selector::ByNodeLabelSelector(selector), _) => Tree {
                index,
                node_group: spec.clone(),
                pools: Vec::new(),
                node_selector: Some(selector.clone()),
            },
        };

        debug!(
            "Node group {} bound by {} to pools {:?}",
            node_group_label(index, spec),
            spec.selector.strategy(),
            tree.pool_names()
        );
        Ok(tree)
    }

    fn pool_by_name<'a>(
        &self,
        index: usize,
        spec: &NodeGroupSpec,
        name: &str,
        pools: &'a [PoolRef],
    ) -> Result<&'a PoolRef, ResolutionError> {
        let found: Vec<&PoolRef> = pools.iter().filter(|pool| pool.name == name).collect();

        match found.as_slice() {
            [pool] => Ok(*pool),
            [] => Err(ResolutionError::PoolNameNotFound {
                node_group: node_group_label(index, spec),
                pool_name: name.to_string(),
            }),
            _ => Err(ResolutionError::PoolNameAmbiguous {
                node_group: node_group_label(index, spec),
                pool_name: name.to_string(),
                count: found.len(),
            }),
        }
    }

    fn pools_by_selector<'a>(
        &self,
        index: usize,
        spec: &NodeGroupSpec,
        selector: &LabelSelector,
        pools: &'a [PoolRef],
    ) -> Result<Vec<&'a PoolRef>, ResolutionError> {
        let compiled =
            matcher::compile(selector).map_err(|source| ResolutionError::MalformedSelector {
                node_group: node_group_label(index, spec),
                selector: selector.canonical(),
                source,
            })?;

        let matched: Vec<&PoolRef> = pools
            .iter()
            .filter(|pool| compiled.matches(&pool.labels))
            .collect();

        if matched.is_empty() {
            return Err(ResolutionError::NoPoolMatched {
                node_group: node_group_label(index, spec),
                selector: selector.canonical(),
            });
        }
        if matched.len() > 1 && !self.policy.multiple_pools_per_tree {
            return Err(ResolutionError::TooManyPools {
                node_group: node_group_label(index, spec),
                selector: selector.canonical(),
                count: matched.len(),
            });
        }

        Ok(matched)
    }
}
