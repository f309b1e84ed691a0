// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for node group resolution

use thiserror::Error;

use crate::cross_tree::CrossTreeError;
use crate::matcher::StructuralError;
use crate::tree::ResolutionError;
use crate::validation::ValidationError;

/// Errors that can occur during a resolution pass
///
/// Every stage of a pass has its own error type; this enum lets callers that
/// run a whole pass handle them through a single `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeGroupError {
    /// A selector expression is malformed
    #[error("malformed selector: {0}")]
    Structural(#[from] StructuralError),

    /// The declared node groups break a structural rule
    #[error("node group validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A node group could not be bound to its pools
    #[error("node group resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    /// A pool is claimed by more than one node group
    #[error("cross-tree validation failed: {0}")]
    CrossTree(#[from] CrossTreeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for node group operations
pub type NodeGroupResult<T> = Result<T, NodeGroupError>;

impl From<serde_json::Error> for NodeGroupError {
    fn from(err: serde_json::Error) -> Self {
        NodeGroupError::Configuration(err.to_string())
    }
}
