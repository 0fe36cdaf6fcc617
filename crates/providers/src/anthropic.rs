use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use crate::json_span::first_object_span;
use crate::{CompletionRequest, ModelBackend, ResponseShape};

static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

pub struct AnthropicClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: SHARED_HTTP.clone(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl ModelBackend for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);

        let req = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system.clone(),
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.user.clone(),
            }],
        };

        debug!(model = %self.model, "anthropic request");

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let detail: String = body.chars().take(800).collect();
            if detail.trim().is_empty() {
                return Err(anyhow!("anthropic error: {}", status));
            }
            return Err(anyhow!("anthropic error: {}\n{}", status, detail));
        }

        let body: AnthropicResponse = resp.json().await?;
        let text = body
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(anyhow!("anthropic returned an empty completion"));
        }

        // No native JSON output mode on this endpoint: the model wraps
        // the object in prose often enough that we scan for the first
        // balanced span instead of trusting the reply wholesale.
        match request.shape {
            ResponseShape::JsonObject => match first_object_span(&text) {
                Some(span) => Ok(span.to_string()),
                None => Err(anyhow!("anthropic reply contained no JSON object")),
            },
            ResponseShape::Text => Ok(text),
        }
    }
}
