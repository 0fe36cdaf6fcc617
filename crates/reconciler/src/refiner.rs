//! Optional single-voice rewrite of a merged reply.
//!
//! One extra call to the designated backend. Everything that can go
//! wrong here is absorbed: a transport error, a missing backend or an
//! implausibly short rewrite all mean the caller keeps the unrefined
//! merge.

use providers::{CompletionRequest, ModelBackend};
use tracing::{debug, warn};

use crate::prompts::refine_prompt;

/// A rewrite shorter than this (after trimming) is treated as a
/// truncated or empty response and discarded.
const MIN_REFINED_CHARS: usize = 40;

/// Ask `backend` to rewrite `merged` as one voice. Returns `None` on
/// any failure; the caller falls back to the unrefined text.
pub async fn refine(backend: &dyn ModelBackend, question: &str, merged: &str) -> Option<String> {
    let (system, user) = refine_prompt(question, merged);
    let request = CompletionRequest::text(Some(system), user);

    match backend.complete(&request).await {
        Ok(refined) => {
            let trimmed = refined.trim();
            if trimmed.chars().count() >= MIN_REFINED_CHARS {
                debug!(backend = backend.name(), chars = trimmed.len(), "refined reply");
                Some(trimmed.to_string())
            } else {
                warn!(
                    backend = backend.name(),
                    chars = trimmed.len(),
                    "refined reply implausibly short, keeping merged text"
                );
                None
            }
        }
        Err(err) => {
            warn!(backend = backend.name(), error = %err, "refinement failed, keeping merged text");
            None
        }
    }
}
