//! REST adapters for the Cloud Resource Manager and GKE control-plane APIs.
//!
//! The wire types below mirror the JSON the services speak; everything is
//! mapped into the shared model at the boundary so the core never sees
//! service-specific field names.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use kubehop_common::cluster::{
    AllowList, AllowListEntry, ClusterSnapshot, OperationHandle, OperationStatus, TargetDescriptor,
};
use kubehop_common::error::{ListError, StatusFetchError, SubmitError};
use kubehop_common::sources::{ClusterAdmin, Directory};

use super::auth::GcloudAuth;

const RESOURCE_MANAGER: &str = "https://cloudresourcemanager.googleapis.com/v1";
const CONTAINER_API: &str = "https://container.googleapis.com/v1";

pub struct GkeApi {
    http: reqwest::Client,
    auth: Arc<GcloudAuth>,
}

impl GkeApi {
    pub fn new(auth: Arc<GcloudAuth>) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth,
        }
    }

    /// Identifiers of all projects in `ACTIVE` lifecycle state.
    pub async fn list_projects(&self) -> Result<Vec<String>, ListError> {
        let response: ProjectList = self
            .get_json(&format!("{RESOURCE_MANAGER}/projects"))
            .await
            .map_err(|e| ListError::Projects(e.to_string()))?;

        Ok(response
            .projects
            .into_iter()
            .filter(|p| p.lifecycle_state == "ACTIVE")
            .map(|p| p.project_id)
            .collect())
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> anyhow::Result<T> {
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Directory for GkeApi {
    async fn projects(&self) -> Result<Vec<String>, ListError> {
        self.list_projects().await
    }

    async fn clusters(&self, project_id: &str) -> Result<Vec<ClusterSnapshot>, ListError> {
        // `locations/-` enumerates every zone and region at once.
        let url = format!("{CONTAINER_API}/projects/{project_id}/locations/-/clusters");
        let response: ClusterList = self.get_json(&url).await.map_err(|e| ListError::Clusters {
            project: project_id.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Found {} clusters in {project_id}", response.clusters.len());
        Ok(response.clusters.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ClusterAdmin for GkeApi {
    async fn submit_allow_list(
        &self,
        target: &TargetDescriptor,
        desired: &AllowList,
        allow_gcp_public_cidrs: bool,
    ) -> Result<OperationHandle, SubmitError> {
        let request = UpdateClusterRequest {
            update: ClusterUpdate {
                desired_master_authorized_networks_config: WireAllowListConfig {
                    enabled: true,
                    cidr_blocks: desired.iter().map(Into::into).collect(),
                    gcp_public_cidrs_access_enabled: allow_gcp_public_cidrs,
                },
            },
        };

        let submit = async {
            let token = self.auth.access_token().await?;
            let url = format!("{CONTAINER_API}/{}", target.resource_name());
            let operation: WireOperation = self
                .http
                .put(&url)
                .bearer_auth(token)
                .json(&request)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            anyhow::Ok(operation.name)
        };

        let name = submit.await.map_err(|e| SubmitError(e.to_string()))?;
        Ok(OperationHandle(format!(
            "projects/{}/locations/{}/operations/{name}",
            target.project_id, target.region
        )))
    }

    async fn operation_status(
        &self,
        _target: &TargetDescriptor,
        handle: &OperationHandle,
    ) -> Result<OperationStatus, StatusFetchError> {
        let url = format!("{CONTAINER_API}/{}", handle.0);
        let operation: WireOperation = self
            .get_json(&url)
            .await
            .map_err(|e| StatusFetchError(e.to_string()))?;

        Ok(OperationStatus {
            terminal: operation.status == "DONE",
            error_message: operation.error.map(|e| e.message),
        })
    }
}

#[derive(Deserialize)]
struct ProjectList {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Project {
    project_id: String,
    #[serde(default)]
    lifecycle_state: String,
}

#[derive(Deserialize)]
struct ClusterList {
    #[serde(default)]
    clusters: Vec<WireCluster>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCluster {
    name: String,
    location: String,
    #[serde(default)]
    master_authorized_networks_config: Option<WireAllowListConfig>,
}

impl From<WireCluster> for ClusterSnapshot {
    fn from(cluster: WireCluster) -> Self {
        let config = cluster.master_authorized_networks_config.unwrap_or_default();
        Self {
            name: cluster.name,
            location: cluster.location,
            allow_list_enabled: config.enabled,
            allow_gcp_public_cidrs: config.gcp_public_cidrs_access_enabled,
            current_allow_list: config.cidr_blocks.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireAllowListConfig {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    cidr_blocks: Vec<WireCidrBlock>,
    #[serde(default)]
    gcp_public_cidrs_access_enabled: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCidrBlock {
    display_name: String,
    cidr_block: String,
}

impl From<WireCidrBlock> for AllowListEntry {
    fn from(block: WireCidrBlock) -> Self {
        Self {
            label: block.display_name,
            cidr: block.cidr_block,
        }
    }
}

impl From<&AllowListEntry> for WireCidrBlock {
    fn from(entry: &AllowListEntry) -> Self {
        Self {
            display_name: entry.label.clone(),
            cidr_block: entry.cidr.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateClusterRequest {
    update: ClusterUpdate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClusterUpdate {
    desired_master_authorized_networks_config: WireAllowListConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOperation {
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<WireStatus>,
}

#[derive(Deserialize)]
struct WireStatus {
    #[serde(default)]
    message: String,
}
