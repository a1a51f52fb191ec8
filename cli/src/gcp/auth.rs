//! gcloud-backed authentication.
//!
//! The access token comes from the operator's local `gcloud` setup and is
//! cached for the lifetime of the process; a run is short enough that token
//! expiry is not a concern.

use anyhow::{Context, bail};
use tokio::process::Command;
use tokio::sync::OnceCell;

pub struct GcloudAuth {
    token: OnceCell<String>,
}

impl GcloudAuth {
    pub fn new() -> Self {
        Self {
            token: OnceCell::new(),
        }
    }

    pub async fn access_token(&self) -> anyhow::Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| async {
                let output = Command::new("gcloud")
                    .args(["auth", "print-access-token"])
                    .output()
                    .await
                    .context("failed to run gcloud")?;

                if !output.status.success() {
                    bail!("gcloud auth print-access-token exited with {}", output.status);
                }

                let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if token.is_empty() {
                    bail!("gcloud returned an empty access token");
                }
                Ok(token)
            })
            .await?;

        Ok(token.as_str())
    }
}
