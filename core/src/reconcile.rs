//! # Access Reconciler
//!
//! Brings remote cluster-access configuration and local tool configuration
//! into the desired state for one operator: merge the operator's current
//! public address into the control-plane allow-list, wait for the update to
//! land, then configure and verify local credentials.

use std::sync::Arc;

use tracing::info;

use kubehop_common::cluster::{ClusterSnapshot, TargetDescriptor};
use kubehop_common::config::PollConfig;
use kubehop_common::error::ReconcileError;
use kubehop_common::sources::{AddressResolver, ClusterAdmin, Toolchain};

use crate::{allowlist, operation};

/// Orchestrates one reconciliation run against a single cluster.
///
/// Steps are sequential and short-circuit on the first failure. The caller
/// owns `target` and `snapshot` for the duration of the run; outcomes are
/// reported through the returned `Result` only.
pub struct Reconciler {
    address: Arc<dyn AddressResolver>,
    admin: Arc<dyn ClusterAdmin>,
    toolchain: Arc<dyn Toolchain>,
    poll: PollConfig,
}

impl Reconciler {
    pub fn new(
        address: Arc<dyn AddressResolver>,
        admin: Arc<dyn ClusterAdmin>,
        toolchain: Arc<dyn Toolchain>,
        poll: PollConfig,
    ) -> Self {
        Self {
            address,
            admin,
            toolchain,
            poll,
        }
    }

    pub async fn reconcile(
        &self,
        target: &TargetDescriptor,
        snapshot: &ClusterSnapshot,
    ) -> Result<(), ReconcileError> {
        if snapshot.allow_list_enabled {
            self.update_allow_list(target, snapshot).await?;
        } else {
            // Policy: never enable the allow-list feature, only update it
            // where it is already on.
            info!(
                "Cluster {} does not restrict control-plane access, skipping allow-list update",
                snapshot.name
            );
        }

        info!("Configuring cluster credentials for {}", target.cluster_name);
        self.toolchain.configure_credentials(target).await?;

        info!("Verifying local cluster context");
        self.toolchain.verify_context().await?;

        Ok(())
    }

    async fn update_allow_list(
        &self,
        target: &TargetDescriptor,
        snapshot: &ClusterSnapshot,
    ) -> Result<(), ReconcileError> {
        let public_ip = self.address.public_ip().await?;

        let mut desired = snapshot.current_allow_list.clone();
        allowlist::merge(&mut desired, &target.operator_label, &format!("{public_ip}/32"));

        info!(
            "Registering {public_ip}/32 as {} in the allow-list of {}",
            target.operator_label, snapshot.name
        );
        let handle = self
            .admin
            .submit_allow_list(target, &desired, snapshot.allow_gcp_public_cidrs)
            .await?;

        operation::await_operation(self.admin.as_ref(), target, &handle, &self.poll).await?;

        info!("Allow-list update applied");
        Ok(())
    }
}
