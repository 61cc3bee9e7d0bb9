//! Pinata pinning client.
//!
//! Pins JSON documents and raw files to IPFS and turns the returned content id into a
//! gateway URL. The [`PinningService`] trait is what the gateway holds, so routes can be
//! exercised against an in-memory double.

use crate::config::CourtroomConfig;
use crate::error::{CourtError, CourtResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Pin content and resolve content ids to gateway URLs.
#[async_trait::async_trait]
pub trait PinningService: Send + Sync {
    /// Pins `data` as JSON under the metadata label `name`; returns the content id.
    async fn pin_json(&self, name: &str, data: &Value) -> CourtResult<String>;

    /// Pins raw bytes as a file named `file_name`; returns the content id.
    async fn pin_file(&self, file_name: &str, bytes: Vec<u8>) -> CourtResult<String>;

    fn gateway_url(&self, content_id: &str) -> String;
}

/// `{base}/ipfs/{id}` with any trailing slash on `base` removed.
pub fn gateway_url(base: &str, content_id: &str) -> String {
    format!("{}/ipfs/{}", base.trim_end_matches('/'), content_id)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PinJsonRequest<'a> {
    pinata_options: PinataOptions,
    pinata_metadata: PinataMetadata<'a>,
    pinata_content: &'a Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PinataOptions {
    cid_version: u8,
}

#[derive(Serialize)]
struct PinataMetadata<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Pinata REST client authenticated with an API key/secret pair.
pub struct PinataClient {
    api_key: String,
    secret_key: String,
    api_base: String,
    gateway_base: String,
    client: reqwest::Client,
}

impl PinataClient {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> CourtResult<Self> {
        Self::with_timeout(api_key, secret_key, Duration::from_secs(60))
    }

    fn with_timeout(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> CourtResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let defaults = CourtroomConfig::default();
        Ok(Self {
            api_key: api_key.into().trim().to_string(),
            secret_key: secret_key.into().trim().to_string(),
            api_base: defaults.pinata_api_base,
            gateway_base: defaults.gateway_base,
            client,
        })
    }

    /// Fails with a configuration error when either credential is missing.
    pub fn from_config(cfg: &CourtroomConfig) -> CourtResult<Self> {
        let (key, secret) = cfg.pinata_credentials()?;
        Ok(Self::with_timeout(key, secret, cfg.http_timeout())?
            .with_api_base(&cfg.pinata_api_base)
            .with_gateway_base(&cfg.gateway_base))
    }

    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_gateway_base(mut self, base: &str) -> Self {
        self.gateway_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Fetches pinned JSON back through the gateway.
    pub async fn get_json(&self, content_id: &str) -> CourtResult<Value> {
        let url = PinningService::gateway_url(self, content_id);
        let res = self.client.get(&url).send().await?;
        let res = check_status(res).await?;
        Ok(res.json().await?)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.secret_key)
    }
}

async fn check_status(res: reqwest::Response) -> CourtResult<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    tracing::warn!(target: "courtroom::pinning", status = %status, "Pinata request failed: {}", body);
    Err(CourtError::Pinning {
        status: status.as_u16(),
        body,
    })
}

#[async_trait::async_trait]
impl PinningService for PinataClient {
    async fn pin_json(&self, name: &str, data: &Value) -> CourtResult<String> {
        let url = format!("{}/pinning/pinJSONToIPFS", self.api_base);
        let body = PinJsonRequest {
            pinata_options: PinataOptions { cid_version: 1 },
            pinata_metadata: PinataMetadata { name },
            pinata_content: data,
        };
        let res = self.authed(self.client.post(&url)).json(&body).send().await?;
        let parsed: PinResponse = check_status(res).await?.json().await?;
        tracing::info!(target: "courtroom::pinning", name = %name, cid = %parsed.ipfs_hash, "Pinned JSON");
        Ok(parsed.ipfs_hash)
    }

    async fn pin_file(&self, file_name: &str, bytes: Vec<u8>) -> CourtResult<String> {
        let url = format!("{}/pinning/pinFileToIPFS", self.api_base);
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let res = self.authed(self.client.post(&url)).multipart(form).send().await?;
        let parsed: PinResponse = check_status(res).await?.json().await?;
        tracing::info!(target: "courtroom::pinning", file = %file_name, cid = %parsed.ipfs_hash, "Pinned file");
        Ok(parsed.ipfs_hash)
    }

    fn gateway_url(&self, content_id: &str) -> String {
        gateway_url(&self.gateway_base, content_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_url_trims_trailing_slash() {
        assert_eq!(
            gateway_url("https://gw.example/", "bafy123"),
            "https://gw.example/ipfs/bafy123"
        );
        assert_eq!(
            gateway_url("https://gw.example", "bafy123"),
            "https://gw.example/ipfs/bafy123"
        );
    }

    #[test]
    fn pin_json_body_matches_pinata_shape() {
        let content = serde_json::json!({"summary": "s", "content": "c"});
        let body = PinJsonRequest {
            pinata_options: PinataOptions { cid_version: 1 },
            pinata_metadata: PinataMetadata { name: "s.txt" },
            pinata_content: &content,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["pinataOptions"]["cidVersion"], 1);
        assert_eq!(v["pinataMetadata"]["name"], "s.txt");
        assert_eq!(v["pinataContent"], content);
    }

    #[test]
    fn from_config_requires_credentials() {
        let cfg = CourtroomConfig::default();
        assert!(PinataClient::from_config(&cfg).is_err());
    }
}
