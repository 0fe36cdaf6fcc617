pub mod analysis;
pub mod error;

pub mod settings {
    use serde::{Deserialize, Serialize};

    fn default_openai_model() -> String {
        "gpt-4o-mini".into()
    }

    fn default_anthropic_model() -> String {
        "claude-3-5-sonnet-20241022".into()
    }

    fn default_max_tokens() -> u32 {
        4096
    }

    /// Provider credentials and model choices, read once at startup.
    ///
    /// A missing API key is not an error: that provider simply reports
    /// itself unavailable on every request.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ProviderSettings {
        pub openai_api_key: Option<String>,
        pub anthropic_api_key: Option<String>,
        #[serde(default = "default_openai_model")]
        pub openai_model: String,
        #[serde(default = "default_anthropic_model")]
        pub anthropic_model: String,
        #[serde(default = "default_max_tokens")]
        pub max_tokens: u32,
    }

    impl ProviderSettings {
        /// Read keys and optional model overrides from the environment.
        pub fn from_env() -> Self {
            let non_empty = |name: &str| {
                std::env::var(name)
                    .ok()
                    .filter(|v| !v.trim().is_empty())
            };
            Self {
                openai_api_key: non_empty("OPENAI_API_KEY"),
                anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
                openai_model: non_empty("OPENAI_MODEL").unwrap_or_else(default_openai_model),
                anthropic_model: non_empty("ANTHROPIC_MODEL")
                    .unwrap_or_else(default_anthropic_model),
                max_tokens: default_max_tokens(),
            }
        }
    }

    impl Default for ProviderSettings {
        fn default() -> Self {
            Self {
                openai_api_key: None,
                anthropic_api_key: None,
                openai_model: default_openai_model(),
                anthropic_model: default_anthropic_model(),
                max_tokens: default_max_tokens(),
            }
        }
    }
}

pub mod chat_api {
    use serde::{Deserialize, Serialize};

    /// One conversational turn.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ChatRequest {
        pub message: String,
        /// Arbitrary structured data attached by the caller. Embedded
        /// into the prompt in truncated form, never persisted.
        #[serde(default)]
        pub context: Option<serde_json::Value>,
    }

    /// The merged reply plus how many backends contributed to it.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ChatResult {
        pub message: String,
        pub contributing_providers: usize,
    }
}
