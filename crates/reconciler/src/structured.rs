//! Union merge of two structured analysis payloads.
//!
//! The two backends are additive sources of analytical breadth, not
//! competing candidates: insights, explanations and charts concatenate
//! in positional order with no deduplication and no cap, and the
//! second summary is appended as an attributed paragraph rather than
//! overwriting the first.

use shared::analysis::AnalysisResult;

/// Lead-in for the second backend's summary paragraph.
const SECONDARY_SUMMARY_LEADIN: &str = "Additional analysis:";

/// Merge two optional analysis payloads. Returns `None` only when both
/// are absent; the caller turns that into the aggregate failure.
pub fn merge_results(
    first: Option<AnalysisResult>,
    second: Option<AnalysisResult>,
) -> Option<AnalysisResult> {
    match (first, second) {
        (None, None) => None,
        (Some(first), None) => Some(first),
        (None, Some(second)) => Some(second),
        (Some(mut merged), Some(second)) => {
            if !second.summary.is_empty() {
                if merged.summary.is_empty() {
                    merged.summary = second.summary;
                } else {
                    merged.summary = format!(
                        "{}\n\n{}\n{}",
                        merged.summary, SECONDARY_SUMMARY_LEADIN, second.summary
                    );
                }
            }
            merged.insights.extend(second.insights);
            merged.explanations.extend(second.explanations);
            merged.charts.extend(second.charts);
            Some(merged)
        }
    }
}
