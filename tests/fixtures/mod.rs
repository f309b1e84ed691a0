// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for nodegroup-resolver
//!
//! Deterministic pool snapshots and node group declarations shared by the
//! integration and property tests.

#![allow(dead_code)]

use nodegroup_resolver::{LabelSelector, NodeGroup, PoolRef};

/// Five pools: `l2=b` is on mcp2 and mcp4, `l3=d` is on mcp3 and mcp5
pub fn five_pools() -> Vec<PoolRef> {
    vec![
        PoolRef::new("mcp1").with_label("l1", "a"),
        PoolRef::new("mcp2").with_label("l2", "b").with_label("l2a", "c"),
        PoolRef::new("mcp3").with_label("l3", "d"),
        PoolRef::new("mcp4").with_label("l2", "b"),
        PoolRef::new("mcp5").with_label("l3", "d"),
    ]
}

/// Selector with a single equality term
pub fn selector(key: &str, value: &str) -> LabelSelector {
    LabelSelector::from_match_labels([(key, value)])
}

/// Node group selecting pools by a single equality term
pub fn pool_group(key: &str, value: &str) -> NodeGroup {
    NodeGroup::by_pool_selector(selector(key, value))
}

/// Names of a list of pools, in order
pub fn names<'a>(pools: impl IntoIterator<Item = &'a PoolRef>) -> Vec<&'a str> {
    pools.into_iter().map(|pool| pool.name.as_str()).collect()
}
