//! Prompt construction for the analysis, chat and refinement calls.
//!
//! Both backends receive the same prompt per request; the response
//! shape hint is what differs per path. The assistant works in Kurdish,
//! Arabic and English and is told to answer in the language of the
//! user's material.

use shared::analysis::AnalysisRequest;
use shared::chat_api::ChatRequest;

/// Upper bound on caller-supplied context embedded into a chat prompt.
pub const MAX_CONTEXT_CHARS: usize = 4000;

const ANALYSIS_SYSTEM: &str = "\
You are a data analyst for a trilingual (Kurdish, Arabic, English) analytics \
assistant. Study the provided tables, texts and notes, and respond with a \
single JSON object and nothing else. The object must have exactly these \
keys: \"summary\" (string), \"insights\" (array of strings), \"explanations\" \
(array of strings), \"charts\" (array of chart objects). Each chart object \
has \"id\", \"title\", \"type\" (one of: bar, line, pie, scatter, histogram), \
\"labels\" (array of strings) and \"datasets\" (array of {\"label\", \
\"values\"} with numeric values). Write all prose in the language of the \
provided material.";

const CHAT_SYSTEM: &str = "\
You are a helpful analytics assistant fluent in Kurdish (Sorani), Arabic and \
English. Always answer in the language the user writes in. Be concrete and \
concise; when context data is provided, ground your answer in it.";

/// Render one analysis request as the user prompt for both backends.
pub fn analysis_prompt(request: &AnalysisRequest) -> (String, String) {
    let mut user = String::new();

    for table in &request.tables {
        user.push_str(&format!(
            "Table \"{}\" (columns: {}):\n",
            table.name,
            table.columns.join(", ")
        ));
        // Rows render in column order so both backends see identical input.
        for row in &table.rows {
            let cells: Vec<String> = table
                .columns
                .iter()
                .map(|col| {
                    row.get(col)
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "null".to_string())
                })
                .collect();
            user.push_str(&cells.join(" | "));
            user.push('\n');
        }
        user.push('\n');
    }

    for (idx, text) in request.texts.iter().enumerate() {
        user.push_str(&format!("Text {}:\n{}\n\n", idx + 1, text));
    }

    if !request.notes.trim().is_empty() {
        user.push_str(&format!("Notes: {}\n", request.notes));
    }

    user.push_str("\nReturn the analysis as the JSON object described in the instructions.");

    (ANALYSIS_SYSTEM.to_string(), user)
}

/// Render one chat request as the user prompt for both backends. The
/// optional context is embedded as serialized JSON, truncated to
/// `MAX_CONTEXT_CHARS` on a character boundary.
pub fn chat_prompt(request: &ChatRequest) -> (String, String) {
    let mut user = String::new();

    if let Some(context) = &request.context {
        let serialized = context.to_string();
        let capped: String = serialized.chars().take(MAX_CONTEXT_CHARS).collect();
        user.push_str(&format!("Context data:\n{}\n\n", capped));
    }
    user.push_str(&request.message);

    (CHAT_SYSTEM.to_string(), user)
}

/// Ask one backend to rewrite the merged reply as a single voice.
pub fn refine_prompt(question: &str, merged: &str) -> (String, String) {
    let system = "You are an editor. Rewrite the draft answer below as one \
coherent answer in a single voice, in the same language as the draft. Remove \
repetition and contradictions, keep every distinct piece of information, and \
do not add new claims."
        .to_string();
    let user = format!(
        "Question:\n{}\n\nDraft answer (may contain two merged voices):\n{}",
        question, merged
    );
    (system, user)
}
