// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resolution Pass
//!
//! One full, stateless run over a snapshot of declared node groups and
//! discovered pools:
//!
//! ```text
//! declared node groups ──> validate ──> typed specs ──┐
//!                                                     ├──> resolve ──> check duplicates ──> flatten
//! discovered pools ───────────────────────────────────┘
//! ```
//!
//! Any error aborts the pass; no partial result is ever returned. Nothing is
//! cached between passes, so concurrent passes over different snapshots need
//! no coordination.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::config::ResolutionPolicy;
use crate::cross_tree::{check_duplicates, flatten};
use crate::domain::{NodeGroup, PoolRef};
use crate::errors::NodeGroupResult;
use crate::tree::{Tree, TreeResolver};
use crate::validation::validated_specs;

/// Outcome of a successful pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution<'a> {
    /// One tree per declared node group, in declaration order
    pub trees: Vec<Tree<'a>>,

    /// Every pool claimed by some node group, each exactly once
    pub pools: Vec<&'a PoolRef>,
}

impl<'a> Resolution<'a> {
    /// Candidate pools that no node group claimed, in candidate order
    pub fn unclaimed_pools(&self, candidates: &'a [PoolRef]) -> Vec<&'a PoolRef> {
        let claimed: BTreeSet<&str> = self.pools.iter().map(|pool| pool.name.as_str()).collect();
        candidates
            .iter()
            .filter(|pool| !claimed.contains(pool.name.as_str()))
            .collect()
    }
}

/// Runs validate → resolve → cross-tree check under one policy
#[derive(Debug, Clone, Default)]
pub struct ResolutionPass {
    resolver: TreeResolver,
}

impl ResolutionPass {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            resolver: TreeResolver::new(policy),
        }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        self.resolver.policy()
    }

    /// Run a full pass over one snapshot
    pub fn run<'a>(
        &self,
        node_groups: &[NodeGroup],
        pools: &'a [PoolRef],
    ) -> NodeGroupResult<Resolution<'a>> {
        info!(
            "Starting resolution pass: {} node groups, {} pools, profile {}",
            node_groups.len(),
            pools.len(),
            self.policy().profile
        );

        let resolution = self.run_stages(node_groups, pools).inspect_err(|err| {
            warn!("Resolution pass rejected: {}", err);
        })?;

        info!(
            "Resolution pass complete: {} trees claim {} pools",
            resolution.trees.len(),
            resolution.pools.len()
        );
        Ok(resolution)
    }

    fn run_stages<'a>(
        &self,
        node_groups: &[NodeGroup],
        pools: &'a [PoolRef],
    ) -> NodeGroupResult<Resolution<'a>> {
        let specs = validated_specs(node_groups)?;
        let trees = self.resolver.resolve(&specs, pools)?;
        check_duplicates(&trees)?;
        let claimed = flatten(&trees);

        Ok(Resolution {
            trees,
            pools: claimed,
        })
    }
}
