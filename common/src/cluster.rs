//! # Cluster Access Model
//!
//! Shared data types describing a cluster, its control-plane allow-list and
//! the remote operations that mutate it.
//!
//! Everything here is plain data: the merge/poll/reconcile logic that acts on
//! these types lives in `kubehop-core`.

/// Fully resolved reconciliation target.
///
/// Built once the operator confirms a cluster choice and an identity label
/// has been resolved; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub project_id: String,
    pub region: String,
    pub cluster_name: String,
    /// Filesystem-safe label derived from the operator's account, used as
    /// the ownership key for allow-list entries.
    pub operator_label: String,
}

impl TargetDescriptor {
    /// Resource path of the cluster, as the control-plane API names it.
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/clusters/{}",
            self.project_id, self.region, self.cluster_name
        )
    }
}

/// One address block permitted to reach the control plane.
///
/// `label` uniquely identifies the owner of the entry within one allow-list;
/// `cidr` is a single address formatted by callers as `<address>/32` in
/// current use, though any prefix length is representable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowListEntry {
    pub label: String,
    pub cidr: String,
}

/// Ordered allow-list. Order-preserving except for in-place replacement on a
/// label match (see `kubehop_core::allowlist::merge`).
pub type AllowList = Vec<AllowListEntry>;

/// Point-in-time view of a cluster, read once at the start of reconciliation.
///
/// Carries no optimistic-concurrency token: a concurrent external writer can
/// race the read-modify-write cycle. The tool assumes single-writer usage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterSnapshot {
    pub name: String,
    pub location: String,
    pub allow_list_enabled: bool,
    pub allow_gcp_public_cidrs: bool,
    pub current_allow_list: AllowList,
}

/// Identifier of a remote long-running operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationHandle(pub String);

/// Status of a long-running operation at one poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationStatus {
    pub terminal: bool,
    pub error_message: Option<String>,
}

impl OperationStatus {
    pub fn pending() -> Self {
        Self {
            terminal: false,
            error_message: None,
        }
    }

    pub fn done() -> Self {
        Self {
            terminal: true,
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            terminal: true,
            error_message: Some(message.into()),
        }
    }
}
