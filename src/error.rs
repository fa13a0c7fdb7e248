//! Error types for resource commands
//!
//! Every failure a command can surface maps to one variant here. Nothing is
//! retried: callers decide whether to re-run.

use std::time::Duration;

use crate::models::FluxResourceKind;

/// Errors produced by the store, adapters and commands
#[derive(Debug, thiserror::Error)]
pub enum FluxError {
    /// The named resource does not exist
    #[error("{kind} '{namespace}/{name}' not found")]
    NotFound {
        kind: FluxResourceKind,
        namespace: String,
        name: String,
    },

    /// The store returned an object the adapter cannot interpret
    #[error("malformed {kind} '{name}': {reason}")]
    MalformedResource {
        kind: FluxResourceKind,
        name: String,
        reason: String,
    },

    /// The object changed between fetch and write-back
    #[error(
        "{kind} '{namespace}/{name}' was modified concurrently, re-run the command to retry"
    )]
    Conflict {
        kind: FluxResourceKind,
        namespace: String,
        name: String,
    },

    /// The invocation deadline expired
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// No registered kind matches the given name or alias
    #[error("unknown resource kind '{0}'")]
    UnknownKind(String),

    /// One or more resources of a batch were not mutated
    #[error("{failed} of {total} resources could not be updated")]
    PartialFailure { failed: usize, total: usize },

    /// Any other store failure (transport, authorization, ...)
    #[error("{operation} {kind} failed: {source}")]
    Store {
        operation: &'static str,
        kind: FluxResourceKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FluxError {
    pub fn malformed(
        kind: FluxResourceKind,
        name: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        FluxError::MalformedResource {
            kind,
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FluxError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, FluxError::Conflict { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FluxError::Timeout(_))
    }
}

pub type Result<T, E = FluxError> = std::result::Result<T, E>;
