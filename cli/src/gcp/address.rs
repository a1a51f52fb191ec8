//! Public address lookup via ipify.

use std::net::IpAddr;

use async_trait::async_trait;

use kubehop_common::error::ResolveError;
use kubehop_common::sources::AddressResolver;

const IPIFY: &str = "https://api.ipify.org";

pub struct IpifyResolver {
    http: reqwest::Client,
    endpoint: String,
}

impl IpifyResolver {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: IPIFY.to_string(),
        }
    }
}

#[async_trait]
impl AddressResolver for IpifyResolver {
    async fn public_ip(&self) -> Result<String, ResolveError> {
        let body = async {
            let response = self
                .http
                .get(&self.endpoint)
                .send()
                .await?
                .error_for_status()?;
            anyhow::Ok(response.text().await?)
        };

        let body = body
            .await
            .map_err(|e| ResolveError::new("public address", e.to_string()))?;

        let addr = body.trim();
        addr.parse::<IpAddr>()
            .map_err(|_| ResolveError::new("public address", format!("not an IP address: {addr}")))?;

        Ok(addr.to_string())
    }
}
