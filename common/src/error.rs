//! Error taxonomy for the cluster-access flow.
//!
//! Listing failures abort the whole run (no interactive choice is possible
//! without a list); everything else is fatal to one reconciliation attempt
//! and surfaces as a single terminal failure event.

use std::time::Duration;

use thiserror::Error;

/// Project or cluster enumeration failed.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("failed to list projects: {0}")]
    Projects(String),

    #[error("failed to list clusters in {project}: {reason}")]
    Clusters { project: String, reason: String },
}

/// Address or identity lookup failed.
#[derive(Error, Debug)]
#[error("failed to resolve {what}: {reason}")]
pub struct ResolveError {
    pub what: &'static str,
    pub reason: String,
}

impl ResolveError {
    pub fn new(what: &'static str, reason: impl Into<String>) -> Self {
        Self {
            what,
            reason: reason.into(),
        }
    }
}

/// The allow-list update request was rejected outright.
#[derive(Error, Debug)]
#[error("allow-list update rejected: {0}")]
pub struct SubmitError(pub String);

/// A single poll attempt failed at the transport/lookup level.
///
/// Distinct from a merely-pending operation: this aborts polling immediately.
#[derive(Error, Debug)]
#[error("failed to fetch operation status: {0}")]
pub struct StatusFetchError(pub String);

/// Terminal outcome of waiting on a long-running operation.
#[derive(Error, Debug)]
pub enum OperationError {
    #[error(transparent)]
    StatusFetch(#[from] StatusFetchError),

    /// The remote operation itself completed with an error payload.
    #[error("operation failed: {0}")]
    Failed(String),

    #[error("operation still pending after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Credential configuration or context verification failed locally.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ConfigureError(pub String);

/// Any fatal condition within one reconciliation attempt.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Configure(#[from] ConfigureError),
}
