//! Model backend clients and the parallel invocation layer.
//!
//! Two concrete clients (an OpenAI-style chat-completions endpoint and
//! an Anthropic-style messages endpoint) sit behind the `ModelBackend`
//! trait. The invoker calls both concurrently and reports each side's
//! outcome independently; nothing in this crate lets one backend's
//! failure escape as an error to the caller.

pub mod anthropic;
pub mod invoker;
pub mod json_span;
pub mod openai;

use anyhow::Result;
use shared::settings::ProviderSettings;
use std::sync::Arc;

/// Response shape the caller expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Free text, returned verbatim.
    Text,
    /// A single JSON object. Backends without a native JSON mode
    /// recover one by scanning the reply for the first balanced span.
    JsonObject,
}

/// A fully-formed prompt for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub user: String,
    pub shape: ResponseShape,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn text(system: Option<String>, user: String) -> Self {
        Self {
            system,
            user,
            shape: ResponseShape::Text,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }

    pub fn json(system: Option<String>, user: String) -> Self {
        Self {
            system,
            user,
            shape: ResponseShape::JsonObject,
            temperature: 0.2,
            max_tokens: 4096,
        }
    }
}

/// One model backend.
///
/// Uses async_trait for object safety; implementations return plain
/// `anyhow` errors and the invoker turns those into outcome values.
#[async_trait::async_trait]
pub trait ModelBackend: Send + Sync {
    /// Backend identifier used in logs.
    fn name(&self) -> &'static str;

    /// Run one completion. An empty reply is an error: a backend that
    /// answered with nothing has not produced usable content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Three-way result of one backend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success(String),
    Failure(String),
    /// No credential configured for this backend. Distinct from a
    /// runtime failure at logging granularity only.
    Unavailable,
}

impl ProviderOutcome {
    pub fn success(&self) -> Option<&str> {
        match self {
            ProviderOutcome::Success(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success(_))
    }
}

/// The two backends, in fixed positional order. A side without a
/// configured credential stays `None` and reports `Unavailable` on
/// every request; that is never a startup error.
#[derive(Clone, Default)]
pub struct ProviderPair {
    pub first: Option<Arc<dyn ModelBackend>>,
    pub second: Option<Arc<dyn ModelBackend>>,
}

impl ProviderPair {
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let first = settings.openai_api_key.as_ref().map(|key| {
            Arc::new(openai::OpenAiClient::new(
                key.clone(),
                settings.openai_model.clone(),
            )) as Arc<dyn ModelBackend>
        });
        let second = settings.anthropic_api_key.as_ref().map(|key| {
            Arc::new(anthropic::AnthropicClient::new(
                key.clone(),
                settings.anthropic_model.clone(),
            )) as Arc<dyn ModelBackend>
        });
        Self { first, second }
    }

    /// The backend a single-provider step (refinement) should use:
    /// the first configured side.
    pub fn designated(&self) -> Option<&Arc<dyn ModelBackend>> {
        self.first.as_ref().or(self.second.as_ref())
    }
}
