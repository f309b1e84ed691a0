// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of validation and resolution over generated snapshots

use nodegroup_resolver::{
    validate_node_groups, NodeGroup, PoolRef, ResolutionPass, ValidationError,
};
use proptest::prelude::*;

use crate::fixtures::{names, pool_group};

/// Pools `pool-0..count`, each carrying a unique `id` label
fn labelled_pools(count: usize) -> Vec<PoolRef> {
    (0..count)
        .map(|i| PoolRef::new(format!("pool-{}", i)).with_label("id", i.to_string()))
        .collect()
}

/// Distinct pool indexes into an 8-pool candidate list, in arbitrary order
fn selection() -> impl Strategy<Value = Vec<usize>> {
    Just((0usize..8).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_flat_map(|order| (0..=order.len()).prop_map(move |n| order[..n].to_vec()))
}

fn declare(selection: &[usize]) -> Vec<NodeGroup> {
    selection
        .iter()
        .map(|i| pool_group("id", &i.to_string()).with_name(format!("ng-{}", i)))
        .collect()
}

proptest! {
    /// Property: distinct, well-formed selectors with distinct names always validate
    #[test]
    fn prop_distinct_declarations_validate(selection in selection()) {
        prop_assert!(validate_node_groups(&declare(&selection)).is_ok());
    }

    /// Property: a node group without a strategy is always an exclusivity error
    #[test]
    fn prop_missing_strategy_is_exclusivity_error(
        selection in selection(),
        position in 0usize..9,
    ) {
        let mut node_groups = declare(&selection);
        let position = position.min(node_groups.len());
        node_groups.insert(position, NodeGroup::default());

        let err = validate_node_groups(&node_groups).unwrap_err();
        prop_assert!(matches!(err, ValidationError::SelectorExclusivity(_)));
    }

    /// Property: each selector binds its own pool, in declaration order
    #[test]
    fn prop_resolution_follows_declaration_order(selection in selection()) {
        let pools = labelled_pools(8);
        let node_groups = declare(&selection);

        let resolution = ResolutionPass::default().run(&node_groups, &pools).unwrap();
        let expected: Vec<String> = selection.iter().map(|i| format!("pool-{}", i)).collect();

        prop_assert_eq!(resolution.trees.len(), selection.len());
        prop_assert_eq!(names(resolution.pools.iter().copied()), expected);
    }

    /// Property: repeated passes over the same snapshot agree
    #[test]
    fn prop_resolution_is_deterministic(selection in selection()) {
        let pools = labelled_pools(8);
        let node_groups = declare(&selection);
        let pass = ResolutionPass::default();

        prop_assert_eq!(pass.run(&node_groups, &pools), pass.run(&node_groups, &pools));
    }
}
