//! One-shot command-line driver for the reconciliation core.
//!
//! Credentials come from the environment (`OPENAI_API_KEY`,
//! `ANTHROPIC_API_KEY`); a missing key degrades that backend to
//! unavailable rather than refusing to start. The HTTP surface lives
//! elsewhere; this binary runs exactly one operation and prints the
//! result as JSON.

use anyhow::{anyhow, Result};
use reconciler::Reconciler;
use shared::analysis::AnalysisRequest;
use shared::chat_api::ChatRequest;
use shared::settings::ProviderSettings;
use std::fs;

const USAGE: &str = "usage:\n  app chat <message> [context.json]\n  app analyze <request.json>";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = ProviderSettings::from_env();
    if settings.openai_api_key.is_none() && settings.anthropic_api_key.is_none() {
        tracing::warn!("no provider credentials configured; every request will fail");
    }
    let reconciler = Reconciler::new(&settings);

    match args.first().map(String::as_str) {
        Some("chat") => {
            let message = args
                .get(1)
                .ok_or_else(|| anyhow!("chat needs a message\n{}", USAGE))?
                .clone();
            let context = match args.get(2) {
                Some(path) => Some(serde_json::from_str(&fs::read_to_string(path)?)?),
                None => None,
            };
            let result = reconciler.chat(&ChatRequest { message, context }).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some("analyze") => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("analyze needs a request file\n{}", USAGE))?;
            let request: AnalysisRequest = serde_json::from_str(&fs::read_to_string(path)?)?;
            let result = reconciler.analyze(&request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => return Err(anyhow!(USAGE)),
    }

    Ok(())
}
