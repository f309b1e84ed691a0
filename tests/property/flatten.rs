// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of flatten and check_duplicates over arbitrary trees

use nodegroup_resolver::{
    check_duplicates, flatten, LabelSelector, NodeGroupSpec, PoolRef, Selector, Tree,
};
use proptest::prelude::*;

use crate::fixtures::names;

fn candidate_pools(count: usize) -> Vec<PoolRef> {
    (0..count).map(|i| PoolRef::new(format!("pool-{}", i))).collect()
}

fn build_trees<'a>(pools: &'a [PoolRef], layout: &[Vec<usize>]) -> Vec<Tree<'a>> {
    layout
        .iter()
        .enumerate()
        .map(|(index, members)| Tree {
            index,
            node_group: NodeGroupSpec::new(Selector::ByPoolLabelSelector(LabelSelector::new())),
            pools: members.iter().map(|&i| &pools[i]).collect(),
            node_selector: None,
        })
        .collect()
}

/// Tree layouts as lists of pool indexes into a 16-pool candidate list
fn layout() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0usize..16, 0..5), 0..8)
}

proptest! {
    /// Property: flatten is the in-order concatenation of every tree's pools
    #[test]
    fn prop_flatten_is_concatenation(layout in layout()) {
        let pools = candidate_pools(16);
        let trees = build_trees(&pools, &layout);

        let expected: Vec<String> = layout
            .iter()
            .flatten()
            .map(|&i| format!("pool-{}", i))
            .collect();

        prop_assert_eq!(names(flatten(&trees)), expected);
    }

    /// Property: flatten is pure, calling it twice yields the same output
    #[test]
    fn prop_flatten_is_pure(layout in layout()) {
        let pools = candidate_pools(16);
        let trees = build_trees(&pools, &layout);

        prop_assert_eq!(flatten(&trees), flatten(&trees));
    }

    /// Property: check_duplicates fails exactly when some pool appears twice
    #[test]
    fn prop_check_duplicates_matches_counts(layout in layout()) {
        let pools = candidate_pools(16);
        let trees = build_trees(&pools, &layout);

        let mut counts = [0usize; 16];
        for &i in layout.iter().flatten() {
            counts[i] += 1;
        }
        let has_duplicate = counts.iter().any(|&c| c > 1);

        prop_assert_eq!(check_duplicates(&trees).is_err(), has_duplicate);
    }
}
