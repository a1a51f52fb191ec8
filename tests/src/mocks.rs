//! Mock collaborators shared by the end-to-end scenarios.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use kubehop_common::cluster::{
    AllowList, ClusterSnapshot, OperationHandle, OperationStatus, TargetDescriptor,
};
use kubehop_common::error::{
    ConfigureError, ListError, ResolveError, StatusFetchError, SubmitError,
};
use kubehop_common::sources::{
    AddressResolver, ClusterAdmin, Directory, IdentityResolver, Toolchain,
};

pub struct MockDirectory {
    pub projects: Vec<String>,
    pub clusters: Vec<ClusterSnapshot>,
}

#[async_trait]
impl Directory for MockDirectory {
    async fn projects(&self) -> Result<Vec<String>, ListError> {
        Ok(self.projects.clone())
    }

    async fn clusters(&self, _project_id: &str) -> Result<Vec<ClusterSnapshot>, ListError> {
        Ok(self.clusters.clone())
    }
}

pub struct MockIdentity(pub &'static str);

#[async_trait]
impl IdentityResolver for MockIdentity {
    async fn operator_label(&self) -> Result<String, ResolveError> {
        Ok(self.0.to_string())
    }
}

pub struct MockAddress(pub &'static str);

#[async_trait]
impl AddressResolver for MockAddress {
    async fn public_ip(&self) -> Result<String, ResolveError> {
        Ok(self.0.to_string())
    }
}

/// Records the submitted allow-list and completes the operation after a
/// configurable number of pending polls.
pub struct MockAdmin {
    pub pending_polls: usize,
    pub fail_operation: Option<&'static str>,
    pub submitted: Mutex<Option<(AllowList, bool)>>,
    pub polls: AtomicUsize,
}

impl MockAdmin {
    pub fn completing_after(pending_polls: usize) -> Self {
        Self {
            pending_polls,
            fail_operation: None,
            submitted: Mutex::new(None),
            polls: AtomicUsize::new(0),
        }
    }

    pub fn failing_with(message: &'static str) -> Self {
        Self {
            fail_operation: Some(message),
            ..Self::completing_after(0)
        }
    }
}

#[async_trait]
impl ClusterAdmin for MockAdmin {
    async fn submit_allow_list(
        &self,
        _target: &TargetDescriptor,
        desired: &AllowList,
        allow_gcp_public_cidrs: bool,
    ) -> Result<OperationHandle, SubmitError> {
        *self.submitted.lock().unwrap() = Some((desired.clone(), allow_gcp_public_cidrs));
        Ok(OperationHandle("op-test".into()))
    }

    async fn operation_status(
        &self,
        _target: &TargetDescriptor,
        _handle: &OperationHandle,
    ) -> Result<OperationStatus, StatusFetchError> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst);
        if poll < self.pending_polls {
            return Ok(OperationStatus::pending());
        }
        match self.fail_operation {
            Some(message) => Ok(OperationStatus::failed(message)),
            None => Ok(OperationStatus::done()),
        }
    }
}

#[derive(Default)]
pub struct MockToolchain {
    pub credentials: AtomicUsize,
    pub verifications: AtomicUsize,
}

#[async_trait]
impl Toolchain for MockToolchain {
    async fn configure_credentials(&self, _target: &TargetDescriptor) -> Result<(), ConfigureError> {
        self.credentials.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn verify_context(&self) -> Result<(), ConfigureError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
