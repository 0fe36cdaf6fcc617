//! Reconciliation core: fan one request out to both model backends and
//! fold their divergent replies into a single deliverable answer.
//!
//! Two public operations, both pure functions of their inputs plus the
//! provider pair:
//! - `analyze` merges two structured analysis payloads by union
//! - `chat` merges two free-text replies by language and length, then
//!   optionally refines the merge into a single voice
//!
//! The only error either operation returns is the aggregate one; every
//! per-backend failure is captured and logged along the way.

pub mod conversation;
pub mod language;
pub mod prompts;
pub mod refiner;
pub mod structured;

use providers::{invoker, CompletionRequest, ProviderOutcome, ProviderPair};
use shared::analysis::{AnalysisRequest, AnalysisResult};
use shared::chat_api::{ChatRequest, ChatResult};
use shared::error::ReconcileError;
use shared::settings::ProviderSettings;
use tracing::{debug, warn};
use uuid::Uuid;

pub use language::Language;

pub struct Reconciler {
    providers: ProviderPair,
}

impl Reconciler {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            providers: ProviderPair::from_settings(settings),
        }
    }

    /// Build from an already-assembled pair (tests, custom endpoints).
    pub fn from_pair(providers: ProviderPair) -> Self {
        Self { providers }
    }

    /// Run the structured analysis pipeline: both backends get the same
    /// JSON-shaped prompt, each success is parsed defensively, and the
    /// payloads merge by union.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ReconcileError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, tables = request.tables.len(), texts = request.texts.len(), "analyze");

        let (system, user) = prompts::analysis_prompt(request);
        let completion = CompletionRequest::json(Some(system), user);
        let (first, second) = invoker::invoke_both(&self.providers, &completion).await;

        let first = parse_payload(first, "first", &request_id);
        let second = parse_payload(second, "second", &request_id);

        structured::merge_results(first, second).ok_or(ReconcileError::AllProvidersFailed)
    }

    /// Run the conversational pipeline: both backends get the same text
    /// prompt, the replies merge by language and length, and a merge
    /// that combined two voices is handed to the refiner (whose failure
    /// is invisible to the caller).
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResult, ReconcileError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, chars = request.message.len(), "chat");

        let (system, user) = prompts::chat_prompt(request);
        let completion = CompletionRequest::text(Some(system), user);
        let (first, second) = invoker::invoke_both(&self.providers, &completion).await;

        let first = first.success();
        let second = second.success();
        let contributing = first.iter().chain(second.iter()).count();

        let merged = conversation::merge_replies(first, second, &request.message)
            .ok_or(ReconcileError::AllProvidersFailed)?;

        // A single-source reply is already one voice; only a dual merge
        // goes through the rewrite pass.
        let message = if contributing == 2 {
            match self.providers.designated() {
                Some(backend) => refiner::refine(backend.as_ref(), &request.message, &merged)
                    .await
                    .unwrap_or(merged),
                None => merged,
            }
        } else {
            merged
        };

        Ok(ChatResult {
            message,
            contributing_providers: contributing,
        })
    }
}

/// Turn one outcome into an optional parsed payload. A success that
/// does not parse as an analysis result counts as a failure, with the
/// detail kept at log granularity only.
fn parse_payload(
    outcome: ProviderOutcome,
    side: &'static str,
    request_id: &Uuid,
) -> Option<AnalysisResult> {
    match outcome {
        ProviderOutcome::Success(text) => match serde_json::from_str::<AnalysisResult>(&text) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(%request_id, side, error = %err, "analysis payload did not parse");
                None
            }
        },
        ProviderOutcome::Failure(_) | ProviderOutcome::Unavailable => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use providers::ModelBackend;
    use serde_json::json;
    use shared::analysis::Table;
    use std::sync::Arc;

    /// Scripted backend: one canned reply for pipeline calls, a
    /// separate canned reply (or error) for refine calls.
    struct ScriptedBackend {
        reply: Result<String, String>,
        refined: Option<String>,
    }

    impl ScriptedBackend {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                refined: None,
            }
        }

        fn err(reason: &str) -> Self {
            Self {
                reply: Err(reason.to_string()),
                refined: None,
            }
        }

        fn with_refined(mut self, refined: &str) -> Self {
            self.refined = Some(refined.to_string());
            self
        }
    }

    #[async_trait::async_trait]
    impl ModelBackend for ScriptedBackend {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            if request.user.contains("Draft answer") {
                return match &self.refined {
                    Some(text) => Ok(text.clone()),
                    None => Err(anyhow!("refine not scripted")),
                };
            }
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(reason) => Err(anyhow!(reason.clone())),
            }
        }
    }

    fn pair(first: Option<ScriptedBackend>, second: Option<ScriptedBackend>) -> ProviderPair {
        ProviderPair {
            first: first.map(|b| Arc::new(b) as Arc<dyn ModelBackend>),
            second: second.map(|b| Arc::new(b) as Arc<dyn ModelBackend>),
        }
    }

    fn charts_payload(ids: &[&str]) -> String {
        let charts: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "title": format!("chart {}", id),
                    "type": "bar",
                    "labels": ["q1", "q2"],
                    "datasets": [{"label": "revenue", "values": [1.0, 2.0]}]
                })
            })
            .collect();
        json!({
            "summary": "numbers look stable",
            "insights": [],
            "explanations": [],
            "charts": charts
        })
        .to_string()
    }

    fn numeric_table_request() -> AnalysisRequest {
        AnalysisRequest {
            tables: vec![Table {
                name: "revenue".into(),
                columns: vec!["month".into(), "amount".into()],
                rows: vec![serde_json::Map::from_iter([
                    ("month".to_string(), json!("jan")),
                    ("amount".to_string(), json!(120.5)),
                ])],
            }],
            texts: vec![],
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_analyze_merges_disjoint_charts_in_order() {
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::ok(&charts_payload(&["a1", "a2", "a3"]))),
            Some(ScriptedBackend::ok(&charts_payload(&["b1", "b2", "b3", "b4"]))),
        ));
        let merged = reconciler.analyze(&numeric_table_request()).await.unwrap();
        assert_eq!(merged.charts.len(), 7);
        let ids: Vec<&str> = merged.charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3", "b1", "b2", "b3", "b4"]);
    }

    #[tokio::test]
    async fn test_analyze_both_unusable_is_aggregate_failure() {
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::err("500")),
            Some(ScriptedBackend::err("overloaded")),
        ));
        let err = reconciler.analyze(&numeric_table_request()).await.unwrap_err();
        assert!(matches!(err, ReconcileError::AllProvidersFailed));
    }

    #[tokio::test]
    async fn test_analyze_unparseable_side_degrades_to_other_side() {
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::ok("sorry, I cannot produce JSON today")),
            Some(ScriptedBackend::ok(&charts_payload(&["b1"]))),
        ));
        let merged = reconciler.analyze(&numeric_table_request()).await.unwrap();
        assert_eq!(merged.charts.len(), 1);
        assert_eq!(merged.summary, "numbers look stable");
    }

    #[tokio::test]
    async fn test_analyze_both_unavailable_is_aggregate_failure() {
        let reconciler = Reconciler::from_pair(pair(None, None));
        let err = reconciler.analyze(&numeric_table_request()).await.unwrap_err();
        assert!(matches!(err, ReconcileError::AllProvidersFailed));
    }

    #[tokio::test]
    async fn test_chat_single_success_returned_verbatim() {
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::ok("the only reply")),
            Some(ScriptedBackend::err("down")),
        ));
        let result = reconciler
            .chat(&ChatRequest {
                message: "anyone there?".into(),
                context: None,
            })
            .await
            .unwrap();
        assert_eq!(result.message, "the only reply");
        assert_eq!(result.contributing_providers, 1);
    }

    #[tokio::test]
    async fn test_chat_dual_success_goes_through_refiner() {
        let refined = "One combined answer that reads as a single voice and keeps both halves.";
        let reconciler = Reconciler::from_pair(pair(
            Some(
                ScriptedBackend::ok("The revenue grew steadily over the whole quarter.")
                    .with_refined(refined),
            ),
            Some(ScriptedBackend::ok(
                "Growth was steady; the strongest month was March overall.",
            )),
        ));
        let result = reconciler
            .chat(&ChatRequest {
                message: "how did revenue do?".into(),
                context: None,
            })
            .await
            .unwrap();
        assert_eq!(result.message, refined);
        assert_eq!(result.contributing_providers, 2);
    }

    #[tokio::test]
    async fn test_chat_short_refinement_keeps_merged_text() {
        let reply_a = "The revenue grew steadily over the whole quarter.";
        let reply_b = "Growth was steady; the strongest month was March overall.";
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::ok(reply_a).with_refined("ok")),
            Some(ScriptedBackend::ok(reply_b)),
        ));
        let result = reconciler
            .chat(&ChatRequest {
                message: "how did revenue do?".into(),
                context: None,
            })
            .await
            .unwrap();
        // Same language, close lengths: the merge concatenates, and the
        // implausibly short rewrite is discarded.
        assert_eq!(result.message, format!("{}\n\n{}", reply_a, reply_b));
    }

    #[tokio::test]
    async fn test_chat_failed_refinement_keeps_merged_text() {
        let reply_a = "The revenue grew steadily over the whole quarter.";
        let reply_b = "Growth was steady; the strongest month was March overall.";
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::ok(reply_a)),
            Some(ScriptedBackend::ok(reply_b)),
        ));
        let result = reconciler
            .chat(&ChatRequest {
                message: "how did revenue do?".into(),
                context: None,
            })
            .await
            .unwrap();
        assert_eq!(result.message, format!("{}\n\n{}", reply_a, reply_b));
        assert_eq!(result.contributing_providers, 2);
    }

    #[tokio::test]
    async fn test_chat_prefers_reply_matching_user_language() {
        let english = "Here is a long explanation in English about your data.";
        let kurdish = "ئەمە وەڵامێکی کوردییە دەربارەی داتاکانت.";
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::ok(english)),
            Some(ScriptedBackend::ok(kurdish)),
        ));
        let result = reconciler
            .chat(&ChatRequest {
                message: "داتاکانم شی بکەرەوە".into(),
                context: None,
            })
            .await
            .unwrap();
        assert_eq!(result.message, kurdish);
        assert_eq!(result.contributing_providers, 2);
    }

    #[tokio::test]
    async fn test_chat_all_failed_is_aggregate_failure() {
        let reconciler = Reconciler::from_pair(pair(
            Some(ScriptedBackend::err("down")),
            None,
        ));
        let err = reconciler
            .chat(&ChatRequest {
                message: "hello".into(),
                context: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ReconcileError::AllProvidersFailed));
    }
}
