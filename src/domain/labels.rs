// Copyright (c) 2025 - Cowboy AI, Inc.
//! Label sets and discovered pools

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A label set: keys are unique, iteration order is the key order
pub type Labels = BTreeMap<String, String>;

/// One discovered resource pool
///
/// Pools are produced by pool discovery outside this crate and are read-only
/// for the duration of a resolution pass. A pool's identity is its name, which
/// is expected to be unique within one candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolRef {
    /// Unique pool name
    pub name: String,

    /// Labels carried by the pool itself (not by its machines)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
}

impl PoolRef {
    /// Create a pool with no labels
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Labels::new(),
        }
    }

    /// Add a label to the pool
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Replace the whole label set
    pub fn with_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels = labels
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }
}

impl fmt::Display for PoolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_builder() {
        let pool = PoolRef::new("worker-cnf")
            .with_label("machineconfiguration.openshift.io/role", "worker-cnf")
            .with_label("tier", "gold");

        assert_eq!(pool.name, "worker-cnf");
        assert_eq!(pool.labels.len(), 2);
        assert_eq!(pool.labels.get("tier").map(String::as_str), Some("gold"));
        assert_eq!(pool.to_string(), "worker-cnf");
    }

    #[test]
    fn test_with_labels_replaces_label_set() {
        let pool = PoolRef::new("worker")
            .with_label("stale", "yes")
            .with_labels([("tier", "gold"), ("zone", "a")]);

        assert_eq!(pool.labels.len(), 2);
        assert!(!pool.labels.contains_key("stale"));
        assert_eq!(pool.labels.get("zone").map(String::as_str), Some("a"));
    }

    #[test]
    fn test_pool_json_without_labels() {
        let pool: PoolRef = serde_json::from_str(r#"{"name": "master"}"#).unwrap();
        assert_eq!(pool, PoolRef::new("master"));
        assert_eq!(serde_json::to_string(&pool).unwrap(), r#"{"name":"master"}"#);
    }
}
