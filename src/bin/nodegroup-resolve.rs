// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Group Resolver CLI
//!
//! Runs one resolution pass over a JSON snapshot and prints the resolved trees.
//!
//! Run with: cargo run --bin nodegroup-resolve -- snapshot.json
//!
//! The snapshot looks like:
//!
//! ```json
//! {
//!   "annotations": { "experimental.multiple-pools-per-tree": "enabled" },
//!   "nodeGroups": [ { "poolSelector": { "matchLabels": { "role": "cnf" } } } ],
//!   "pools": [ { "name": "worker-cnf", "labels": { "role": "cnf" } } ]
//! }
//! ```
//!
//! The policy comes from NODEGROUP_* environment variables, then annotations.

use anyhow::{Context, Result};
use nodegroup_resolver::{Labels, NodeGroup, PoolRef, ResolutionPass, ResolutionPolicy};
use serde::Deserialize;
use tracing::{debug, info};

/// Input snapshot for one pass
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    /// Annotations of the object owning the node groups
    #[serde(default)]
    annotations: Labels,
    #[serde(default)]
    node_groups: Vec<NodeGroup>,
    #[serde(default)]
    pools: Vec<PoolRef>,
}

fn main() -> Result<()> {
    // Logs go to stderr, the resolution to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NODEGROUP_SNAPSHOT").ok())
        .context("usage: nodegroup-resolve <snapshot.json> (or set NODEGROUP_SNAPSHOT)")?;

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshot {}", path))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path))?;
    info!(
        "Loaded snapshot {}: {} node groups, {} pools",
        path,
        snapshot.node_groups.len(),
        snapshot.pools.len()
    );

    let policy = ResolutionPolicy::from_env()
        .context("Invalid resolution policy in environment")?
        .merge_annotations(&snapshot.annotations);
    debug!("Resolution policy: {:?}", policy);

    let pass = ResolutionPass::new(policy);
    let resolution = pass
        .run(&snapshot.node_groups, &snapshot.pools)
        .context("Resolution pass failed")?;

    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}
