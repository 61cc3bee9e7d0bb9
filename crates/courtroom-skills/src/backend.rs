//! Client for the courtroom gateway's upload endpoints.

use courtroom_core::{CourtError, CourtResult, CourtroomConfig};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Success body of every upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub ipfs_hash: String,
    pub gateway_url: String,
}

pub struct BackendClient {
    base: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(base: &str, timeout: Duration) -> CourtResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(cfg: &CourtroomConfig) -> CourtResult<Self> {
        Self::new(&cfg.backend_base, cfg.http_timeout())
    }

    /// POSTs `body` as JSON to `path` (e.g. `/evidence`).
    pub async fn upload_json(&self, path: &str, body: &Value) -> CourtResult<UploadResponse> {
        let url = format!("{}{}", self.base, path);
        tracing::info!(target: "courtroom::skills", url = %url, "Uploading to backend");
        let res = self.client.post(&url).json(body).send().await?;
        parse_upload(res).await
    }

    /// POSTs a PNG to `/image` as multipart field `file`.
    pub async fn upload_image(&self, file_name: &str, png: Vec<u8>) -> CourtResult<UploadResponse> {
        let url = format!("{}/image", self.base);
        let part = reqwest::multipart::Part::bytes(png)
            .file_name(file_name.to_string())
            .mime_str("image/png")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        tracing::info!(target: "courtroom::skills", url = %url, file = %file_name, "Uploading image to backend");
        let res = self.client.post(&url).multipart(form).send().await?;
        parse_upload(res).await
    }
}

async fn parse_upload(res: reqwest::Response) -> CourtResult<UploadResponse> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(CourtError::Upstream {
            service: "Backend upload",
            status: status.as_u16(),
            body,
        });
    }
    let parsed: UploadResponse = res.json().await?;
    tracing::info!(target: "courtroom::skills", gateway_url = %parsed.gateway_url, "Content saved");
    Ok(parsed)
}
