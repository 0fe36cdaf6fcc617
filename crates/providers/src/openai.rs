use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use crate::{CompletionRequest, ModelBackend, ResponseShape};

static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: SHARED_HTTP.clone(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a compatible endpoint (self-hosted gateways).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl ModelBackend for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(OpenAiMessage {
                role: "system",
                content: system.clone(),
            });
        }
        messages.push(OpenAiMessage {
            role: "user",
            content: request.user.clone(),
        });

        // This endpoint emits a well-formed JSON body natively when asked.
        let response_format = match request.shape {
            ResponseShape::JsonObject => Some(ResponseFormat {
                format_type: "json_object",
            }),
            ResponseShape::Text => None,
        };

        let req = OpenAiRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
        };

        debug!(model = %self.model, "openai request");

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let detail: String = body.chars().take(800).collect();
            if detail.trim().is_empty() {
                return Err(anyhow!("openai error: {}", status));
            }
            return Err(anyhow!("openai error: {}\n{}", status, detail));
        }

        let body: OpenAiResponse = resp.json().await?;
        let text = body
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(anyhow!("openai returned an empty completion"));
        }
        Ok(text)
    }
}
