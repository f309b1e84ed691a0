// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node group resolution for cluster machine pools
//!
//! Turns a declarative list of node groups into an unambiguous mapping from
//! each node group to the pool(s) it matches, and rejects any declaration set
//! that is inconsistent: missing or competing selectors, duplicated selectors
//! or names, malformed selectors, unmatched or over-matched selectors, and
//! pools claimed by more than one node group.
//!
//! # Example
//!
//! ```rust
//! use nodegroup_resolver::{LabelSelector, NodeGroup, PoolRef, ResolutionPass};
//!
//! let pools = vec![
//!     PoolRef::new("worker").with_label("role", "worker"),
//!     PoolRef::new("worker-cnf").with_label("role", "cnf"),
//! ];
//! let node_groups = vec![NodeGroup::by_pool_selector(
//!     LabelSelector::from_match_labels([("role", "cnf")]),
//! )];
//!
//! let resolution = ResolutionPass::default().run(&node_groups, &pools).unwrap();
//! assert_eq!(resolution.trees[0].pool_names(), vec!["worker-cnf"]);
//! ```

pub mod config;
pub mod cross_tree;
pub mod domain;
pub mod errors;
pub mod matcher;
pub mod pass;
pub mod tree;
pub mod validation;

// Re-export commonly used types
pub use config::{DeploymentProfile, ResolutionPolicy};
pub use cross_tree::{check_duplicates, flatten, CrossTreeError};
pub use domain::{
    LabelSelector, LabelSelectorRequirement, Labels, NodeGroup, NodeGroupConfig, NodeGroupSpec,
    PoolRef, Selector, SelectorKey, SelectorOperator,
};
pub use errors::{NodeGroupError, NodeGroupResult};
pub use matcher::StructuralError;
pub use pass::{Resolution, ResolutionPass};
pub use tree::{ResolutionError, Tree, TreeResolver};
pub use validation::{validate_node_groups, validated_specs, ValidationError, ValidationResult};
