// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Group Declarations and Typed Selectors
//!
//! Documents declare a node group with one optional field per selection
//! strategy ([`NodeGroup`]). Once the declaration is known to populate exactly
//! one of them it converts into a [`NodeGroupSpec`], whose [`Selector`] makes
//! "exactly one strategy" a property of the type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{LabelSelector, NodeGroupConfig};
use crate::validation::ValidationError;

/// Node group as declared in a document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroup {
    /// Optional explicit name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Direct reference to a pool by its unique name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_name: Option<String>,

    /// Selector evaluated against pool labels
    #[serde(
        default,
        alias = "machineConfigPoolSelector",
        skip_serializing_if = "Option::is_none"
    )]
    pub pool_selector: Option<LabelSelector>,

    /// Selector evaluated against machine labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<LabelSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeGroupConfig>,
}

impl NodeGroup {
    pub fn by_pool_name(pool_name: impl Into<String>) -> Self {
        Self {
            pool_name: Some(pool_name.into()),
            ..Default::default()
        }
    }

    pub fn by_pool_selector(selector: LabelSelector) -> Self {
        Self {
            pool_selector: Some(selector),
            ..Default::default()
        }
    }

    pub fn by_node_selector(selector: LabelSelector) -> Self {
        Self {
            node_selector: Some(selector),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_config(mut self, config: NodeGroupConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Number of selection strategies populated on this declaration
    pub fn strategy_count(&self) -> usize {
        [
            self.pool_name.is_some(),
            self.pool_selector.is_some(),
            self.node_selector.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// The typed selector, if exactly one strategy is populated
    pub fn selector(&self) -> Option<Selector> {
        match (&self.pool_name, &self.pool_selector, &self.node_selector) {
            (Some(name), None, None) => Some(Selector::ByPoolName(name.clone())),
            (None, Some(sel), None) => Some(Selector::ByPoolLabelSelector(sel.clone())),
            (None, None, Some(sel)) => Some(Selector::ByNodeLabelSelector(sel.clone())),
            _ => None,
        }
    }
}

/// Selection strategy of a node group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Selector {
    ByPoolName(String),
    ByPoolLabelSelector(LabelSelector),
    ByNodeLabelSelector(LabelSelector),
}

impl Selector {
    /// Short strategy name used in logs and errors
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::ByPoolName(_) => "pool name",
            Self::ByPoolLabelSelector(_) => "pool selector",
            Self::ByNodeLabelSelector(_) => "node selector",
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByPoolName(name) => write!(f, "pool name {:?}", name),
            Self::ByPoolLabelSelector(sel) => write!(f, "pool selector {:?}", sel.to_string()),
            Self::ByNodeLabelSelector(sel) => write!(f, "node selector {:?}", sel.to_string()),
        }
    }
}

/// Node group with exactly one selection strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroupSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub selector: Selector,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeGroupConfig>,
}

impl NodeGroupSpec {
    pub fn new(selector: Selector) -> Self {
        Self {
            name: None,
            selector,
            config: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_config(mut self, config: NodeGroupConfig) -> Self {
        self.config = Some(config);
        self
    }
}

impl TryFrom<NodeGroup> for NodeGroupSpec {
    type Error = ValidationError;

    fn try_from(node_group: NodeGroup) -> Result<Self, Self::Error> {
        let selector = node_group.selector().ok_or_else(|| {
            ValidationError::SelectorExclusivity(vec![exclusivity_message(
                node_group.strategy_count(),
            )])
        })?;

        Ok(Self {
            name: node_group.name,
            selector,
            config: node_group.config,
        })
    }
}

impl From<NodeGroupSpec> for NodeGroup {
    fn from(spec: NodeGroupSpec) -> Self {
        let mut node_group = NodeGroup {
            name: spec.name,
            config: spec.config,
            ..Default::default()
        };
        match spec.selector {
            Selector::ByPoolName(name) => node_group.pool_name = Some(name),
            Selector::ByPoolLabelSelector(sel) => node_group.pool_selector = Some(sel),
            Selector::ByNodeLabelSelector(sel) => node_group.node_selector = Some(sel),
        }
        node_group
    }
}

/// Message for a declaration populating `count` strategies, `count != 1`
pub(crate) fn exclusivity_message(count: usize) -> String {
    if count == 0 {
        "one of the node groups does not specify a selector".to_string()
    } else {
        "only one selector is allowed to be specified under a node group".to_string()
    }
}
