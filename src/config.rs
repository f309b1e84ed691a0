// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resolution policy
//!
//! Deployment-level switches that change how node groups bind to pools. The
//! engine itself never decides these; callers build a policy from defaults,
//! environment variables, or the annotations of the owning object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::domain::Labels;
use crate::errors::{NodeGroupError, NodeGroupResult};

/// Annotation that re-enables multiple pools per tree
pub const MULTIPLE_POOLS_PER_TREE_ANNOTATION: &str = "experimental.multiple-pools-per-tree";

/// Annotation value that turns [`MULTIPLE_POOLS_PER_TREE_ANNOTATION`] on
pub const MULTIPLE_POOLS_PER_TREE_ENABLED: &str = "enabled";

/// Label that hosted clusters put on the machines of a node pool
pub const DEFAULT_HOSTED_POOL_LABEL: &str = "hypershift.openshift.io/node-pool";

/// Which selection strategies a deployment supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentProfile {
    /// Pools are discovered objects with labels: pool names are looked up,
    /// pool selectors are evaluated against pool labels
    #[default]
    Standard,
    /// Pools are not discoverable objects: a pool name becomes a selector on
    /// machine labels, pool selectors are unsupported
    Hosted,
}

impl DeploymentProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hosted => "hosted",
        }
    }
}

impl fmt::Display for DeploymentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeploymentProfile {
    type Err = NodeGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "hosted" => Ok(Self::Hosted),
            other => Err(NodeGroupError::Configuration(format!(
                "unknown deployment profile {:?}, expected \"standard\" or \"hosted\"",
                other
            ))),
        }
    }
}

/// Policy applied to one resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionPolicy {
    /// Allow a pool selector to bind more than one pool
    #[serde(default)]
    pub multiple_pools_per_tree: bool,

    #[serde(default)]
    pub profile: DeploymentProfile,

    /// Machine label used for pool names under [`DeploymentProfile::Hosted`]
    #[serde(default = "default_hosted_pool_label")]
    pub hosted_pool_label: String,
}

fn default_hosted_pool_label() -> String {
    DEFAULT_HOSTED_POOL_LABEL.to_string()
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            multiple_pools_per_tree: false,
            profile: DeploymentProfile::Standard,
            hosted_pool_label: default_hosted_pool_label(),
        }
    }
}

impl ResolutionPolicy {
    pub const ENV_MULTIPLE_POOLS_PER_TREE: &'static str = "NODEGROUP_MULTIPLE_POOLS_PER_TREE";
    pub const ENV_PROFILE: &'static str = "NODEGROUP_PROFILE";
    pub const ENV_HOSTED_POOL_LABEL: &'static str = "NODEGROUP_HOSTED_POOL_LABEL";

    pub fn with_multiple_pools_per_tree(mut self, enabled: bool) -> Self {
        self.multiple_pools_per_tree = enabled;
        self
    }

    pub fn with_profile(mut self, profile: DeploymentProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_hosted_pool_label(mut self, label: impl Into<String>) -> Self {
        self.hosted_pool_label = label.into();
        self
    }

    /// Default policy adjusted by the annotations of the owning object
    pub fn from_annotations(annotations: &Labels) -> Self {
        Self::default().merge_annotations(annotations)
    }

    /// Turn on multiple pools per tree if the annotations opt in
    ///
    /// Annotations can only relax the policy, never tighten a setting that was
    /// enabled elsewhere.
    pub fn merge_annotations(mut self, annotations: &Labels) -> Self {
        if is_multiple_pools_per_tree(annotations) {
            debug!(
                "Multiple pools per tree enabled by annotation {}",
                MULTIPLE_POOLS_PER_TREE_ANNOTATION
            );
            self.multiple_pools_per_tree = true;
        }
        self
    }

    /// Load the policy from environment variables
    pub fn from_env() -> NodeGroupResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the policy through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> NodeGroupResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();

        if let Some(raw) = lookup(Self::ENV_MULTIPLE_POOLS_PER_TREE) {
            policy.multiple_pools_per_tree =
                parse_switch(Self::ENV_MULTIPLE_POOLS_PER_TREE, &raw)?;
        }
        if let Some(raw) = lookup(Self::ENV_PROFILE) {
            policy.profile = raw.parse()?;
        }
        if let Some(label) = lookup(Self::ENV_HOSTED_POOL_LABEL) {
            let label = label.trim();
            if label.is_empty() {
                return Err(NodeGroupError::Configuration(format!(
                    "{} must not be empty",
                    Self::ENV_HOSTED_POOL_LABEL
                )));
            }
            policy.hosted_pool_label = label.to_string();
        }

        Ok(policy)
    }
}

/// True when the annotations opt in to multiple pools per tree
pub fn is_multiple_pools_per_tree(annotations: &Labels) -> bool {
    annotations
        .get(MULTIPLE_POOLS_PER_TREE_ANNOTATION)
        .is_some_and(|v| v == MULTIPLE_POOLS_PER_TREE_ENABLED)
}

fn parse_switch(name: &str, raw: &str) -> NodeGroupResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "enabled" | "yes" => Ok(true),
        "0" | "false" | "disabled" | "no" | "" => Ok(false),
        other => Err(NodeGroupError::Configuration(format!(
            "{} has invalid value {:?}",
            name, other
        ))),
    }
}
