// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Group Domain Models
//!
//! Value objects consumed and produced by a resolution pass.
//!
//! # Inputs
//!
//! - [`PoolRef`] - A discovered pool: unique name plus label set
//! - [`NodeGroup`] - A node group as declared in a document
//! - [`NodeGroupSpec`] - A node group with exactly one [`Selector`]
//!
//! # Selectors
//!
//! - [`LabelSelector`] - Equality and set-based label terms
//! - [`SelectorOperator`] - `In`, `NotIn`, `Exists`, `DoesNotExist`, `Equals`, `NotEquals`
//!
//! # Settings
//!
//! - [`NodeGroupConfig`] - Topology reporting settings carried through to trees

pub mod labels;
pub mod node_group;
pub mod node_group_config;
pub mod selector;

pub use labels::{Labels, PoolRef};
pub use node_group::{NodeGroup, NodeGroupSpec, Selector};
pub use node_group_config::{
    InfoRefreshMode, InfoRefreshPauseMode, NodeGroupConfig, PodsFingerprintingMode,
};
pub use selector::{LabelSelector, LabelSelectorRequirement, SelectorKey, SelectorOperator};
