//! # Collaborator Seams
//!
//! Traits over every external system the core flow touches: the cloud
//! project/cluster directory, the control-plane admin API, the operator's
//! public address and identity, and the local credential toolchain.
//!
//! Production adapters live in the CLI crate; tests substitute mocks.

use async_trait::async_trait;

use crate::cluster::{
    AllowList, ClusterSnapshot, OperationHandle, OperationStatus, TargetDescriptor,
};
use crate::error::{ConfigureError, ListError, ResolveError, StatusFetchError, SubmitError};

/// Enumerates cloud projects and the clusters within them.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Identifiers of all projects the operator can currently use.
    async fn projects(&self) -> Result<Vec<String>, ListError>;

    /// Point-in-time snapshots of every cluster in `project_id`.
    async fn clusters(&self, project_id: &str) -> Result<Vec<ClusterSnapshot>, ListError>;
}

/// Resolves the caller's current public network address.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// A bare IPv4/IPv6 address string, no prefix length.
    async fn public_ip(&self) -> Result<String, ResolveError>;
}

/// Resolves a stable, filesystem-safe label for the operator.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn operator_label(&self) -> Result<String, ResolveError>;
}

/// Submits control-plane updates and reports on their progress.
#[async_trait]
pub trait ClusterAdmin: Send + Sync {
    /// Requests that the cluster's allow-list become `desired`, leaving the
    /// provider-public-CIDR access flag at `allow_gcp_public_cidrs`.
    async fn submit_allow_list(
        &self,
        target: &TargetDescriptor,
        desired: &AllowList,
        allow_gcp_public_cidrs: bool,
    ) -> Result<OperationHandle, SubmitError>;

    /// Current status of a previously submitted operation.
    async fn operation_status(
        &self,
        target: &TargetDescriptor,
        handle: &OperationHandle,
    ) -> Result<OperationStatus, StatusFetchError>;
}

/// Local tooling side effects: credential setup and context verification.
///
/// Both are opaque to the core; each succeeds or fails as a unit.
#[async_trait]
pub trait Toolchain: Send + Sync {
    async fn configure_credentials(&self, target: &TargetDescriptor) -> Result<(), ConfigureError>;

    async fn verify_context(&self) -> Result<(), ConfigureError>;
}
