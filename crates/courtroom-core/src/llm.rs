//! Hosted model client: OpenAI-compatible streamed chat and text-to-image inference.

use crate::config::CourtroomConfig;
use crate::error::{CourtError, CourtResult};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    stream: bool,
}

/// Streaming chunk from an OpenAI-compatible API (SSE data format)
#[derive(Deserialize, Debug)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Deserialize, Debug)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    inputs: &'a str,
}

pub struct HostedModelClient {
    api_key: String,
    chat_api_base: String,
    image_api_base: String,
    client: reqwest::Client,
}

impl HostedModelClient {
    pub fn new(
        api_key: impl Into<String>,
        chat_api_base: &str,
        image_api_base: &str,
        timeout: std::time::Duration,
    ) -> CourtResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: api_key.into().trim().to_string(),
            chat_api_base: chat_api_base.trim_end_matches('/').to_string(),
            image_api_base: image_api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(cfg: &CourtroomConfig) -> CourtResult<Self> {
        Self::new(
            cfg.huggingface_api_key()?,
            &cfg.chat_api_base,
            &cfg.image_api_base,
            cfg.http_timeout(),
        )
    }

    /// Sends `prompt` as a single user message with `stream: true` and concatenates
    /// every delta until `[DONE]` or end of stream.
    pub async fn stream_chat(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> CourtResult<String> {
        let url = format!("{}/chat/completions", self.chat_api_base);
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            stream: true,
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response, "Chat completion").await?;
        tracing::info!(target: "courtroom::llm", model = %model, "SSE stream established");

        let mut stream = response.bytes_stream();
        let mut lines = LineBuffer::default();
        let mut output = String::new();
        while let Some(bytes) = stream.try_next().await? {
            for line in lines.push(&bytes) {
                if accumulate_sse_line(&line, &mut output) {
                    return Ok(output);
                }
            }
        }
        accumulate_sse_line(&lines.finish(), &mut output);
        Ok(output)
    }

    /// Runs a text-to-image model and returns the raw image bytes the service sends back.
    pub async fn text_to_image(&self, model: &str, prompt: &str) -> CourtResult<Vec<u8>> {
        let url = format!("{}/models/{}", self.image_api_base, model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ImageRequest { inputs: prompt })
            .send()
            .await?;
        let response = check_status(response, "Image generation").await?;
        let bytes = response.bytes().await?;
        tracing::info!(target: "courtroom::llm", model = %model, bytes = bytes.len(), "Image generated");
        Ok(bytes.to_vec())
    }
}

/// Splits a byte stream on `\n`. Bytes are decoded only once their line is complete, so a
/// multi-byte character split across network chunks comes through intact.
#[derive(Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&line).trim().to_string());
        }
        lines
    }

    fn finish(self) -> String {
        String::from_utf8_lossy(&self.pending).trim().to_string()
    }
}

/// Appends the delta carried by one SSE line. Returns true on `[DONE]`.
fn accumulate_sse_line(line: &str, output: &mut String) -> bool {
    let Some(data) = line.strip_prefix("data:") else {
        return false;
    };
    let data = data.trim();
    if data == "[DONE]" {
        return true;
    }
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => {
            if let Some(content) = chunk.choices.first().and_then(|c| c.delta.content.as_deref()) {
                output.push_str(content);
            }
        }
        Err(e) => {
            tracing::debug!(target: "courtroom::llm", "Failed to parse SSE chunk: {} - data: {}", e, data);
        }
    }
    false
}

async fn check_status(
    response: reqwest::Response,
    service: &'static str,
) -> CourtResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(target: "courtroom::llm", status = %status, "{} failed: {}", service, body);
    Err(CourtError::Upstream {
        service,
        status: status.as_u16(),
        body,
    })
}
