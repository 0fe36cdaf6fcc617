//! Settle-all invocation of the provider pair.
//!
//! Both backends run concurrently and both are always driven to
//! completion: a failure on one side never cancels or short-circuits
//! the other. Outcome pairing is positional; completion order carries
//! no meaning.

use tracing::{debug, warn};

use crate::{CompletionRequest, ModelBackend, ProviderOutcome, ProviderPair};

/// Invoke both backends with the same prompt and wait for both to
/// settle. Never returns an error: per-backend failures become
/// `ProviderOutcome::Failure` values and the detail stays in the logs.
pub async fn invoke_both(
    pair: &ProviderPair,
    request: &CompletionRequest,
) -> (ProviderOutcome, ProviderOutcome) {
    futures::future::join(
        invoke_one(pair.first.as_deref(), request),
        invoke_one(pair.second.as_deref(), request),
    )
    .await
}

async fn invoke_one(
    backend: Option<&dyn ModelBackend>,
    request: &CompletionRequest,
) -> ProviderOutcome {
    let Some(backend) = backend else {
        debug!("backend not configured, skipping");
        return ProviderOutcome::Unavailable;
    };
    match backend.complete(request).await {
        Ok(text) => {
            debug!(backend = backend.name(), chars = text.len(), "completion ok");
            ProviderOutcome::Success(text)
        }
        Err(err) => {
            warn!(backend = backend.name(), error = %err, "completion failed");
            ProviderOutcome::Failure(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedBackend {
        name: &'static str,
        reply: Result<&'static str, &'static str>,
        delay: Duration,
    }

    impl FixedBackend {
        fn ok(reply: &'static str) -> Self {
            Self {
                name: "fixed",
                reply: Ok(reply),
                delay: Duration::ZERO,
            }
        }

        fn err(reason: &'static str) -> Self {
            Self {
                name: "fixed",
                reply: Err(reason),
                delay: Duration::ZERO,
            }
        }

        fn after(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait::async_trait]
    impl ModelBackend for FixedBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(reason) => Err(anyhow!(reason)),
            }
        }
    }

    fn pair(
        first: Option<FixedBackend>,
        second: Option<FixedBackend>,
    ) -> ProviderPair {
        ProviderPair {
            first: first.map(|b| Arc::new(b) as Arc<dyn ModelBackend>),
            second: second.map(|b| Arc::new(b) as Arc<dyn ModelBackend>),
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest::text(None, "hello".into())
    }

    #[tokio::test]
    async fn test_both_succeed_positionally() {
        let pair = pair(Some(FixedBackend::ok("one")), Some(FixedBackend::ok("two")));
        let (a, b) = invoke_both(&pair, &request()).await;
        assert_eq!(a, ProviderOutcome::Success("one".into()));
        assert_eq!(b, ProviderOutcome::Success("two".into()));
    }

    #[tokio::test]
    async fn test_immediate_failure_does_not_cancel_slow_success() {
        // One side fails at once; the other answers after a delay. The
        // delayed success must still arrive intact.
        let pair = pair(
            Some(FixedBackend::err("boom")),
            Some(FixedBackend::ok("slow but fine").after(Duration::from_millis(50))),
        );
        let (a, b) = invoke_both(&pair, &request()).await;
        assert!(matches!(a, ProviderOutcome::Failure(_)));
        assert_eq!(b, ProviderOutcome::Success("slow but fine".into()));
    }

    #[tokio::test]
    async fn test_missing_credential_is_unavailable_not_failure() {
        let pair = pair(None, Some(FixedBackend::ok("present")));
        let (a, b) = invoke_both(&pair, &request()).await;
        assert_eq!(a, ProviderOutcome::Unavailable);
        assert!(b.is_success());
    }

    #[tokio::test]
    async fn test_both_sides_settle_when_both_fail() {
        let pair = pair(Some(FixedBackend::err("a down")), Some(FixedBackend::err("b down")));
        let (a, b) = invoke_both(&pair, &request()).await;
        assert!(matches!(a, ProviderOutcome::Failure(_)));
        assert!(matches!(b, ProviderOutcome::Failure(_)));
    }
}
