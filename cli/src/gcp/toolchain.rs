//! gcloud/kubectl subprocess adapters.
//!
//! Identity comes from the configured gcloud account; the credential and
//! context steps shell out exactly as an operator would, with output
//! discarded so the picker stays clean.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use kubehop_common::cluster::TargetDescriptor;
use kubehop_common::error::{ConfigureError, ResolveError};
use kubehop_common::sources::{IdentityResolver, Toolchain};

pub struct GcloudToolchain;

impl GcloudToolchain {
    pub fn new() -> Self {
        Self
    }
}

/// Turns an account email into a filesystem-safe allow-list label:
/// the local part with `.` replaced by `-`.
fn label_from_email(email: &str) -> Option<String> {
    let (local, _domain) = email.split_once('@')?;
    if local.is_empty() {
        return None;
    }
    Some(local.replace('.', "-"))
}

#[async_trait]
impl IdentityResolver for GcloudToolchain {
    async fn operator_label(&self) -> Result<String, ResolveError> {
        let output = Command::new("gcloud")
            .args(["config", "get-value", "account"])
            .output()
            .await
            .map_err(|e| ResolveError::new("identity", e.to_string()))?;

        if !output.status.success() {
            return Err(ResolveError::new(
                "identity",
                format!("gcloud exited with {}", output.status),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .find(|line| line.contains('@'))
            .and_then(label_from_email)
            .ok_or_else(|| ResolveError::new("identity", "no gcloud account configured"))
    }
}

#[async_trait]
impl Toolchain for GcloudToolchain {
    async fn configure_credentials(&self, target: &TargetDescriptor) -> Result<(), ConfigureError> {
        let status = Command::new("gcloud")
            .args([
                "container",
                "clusters",
                "get-credentials",
                &target.cluster_name,
                "--region",
                &target.region,
                "--project",
                &target.project_id,
            ])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ConfigureError(format!("failed to run gcloud: {e}")))?;

        if !status.success() {
            return Err(ConfigureError(format!(
                "gcloud get-credentials exited with {status}"
            )));
        }
        Ok(())
    }

    async fn verify_context(&self) -> Result<(), ConfigureError> {
        let status = Command::new("kubectl")
            .args(["config", "current-context"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ConfigureError(format!("failed to run kubectl: {e}")))?;

        if !status.success() {
            return Err(ConfigureError(format!(
                "kubectl config current-context exited with {status}"
            )));
        }
        Ok(())
    }
}
