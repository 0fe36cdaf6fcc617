//! Data model for the structured analysis pipeline.
//!
//! Requests are caller-built and immutable; results come back from the
//! model backends as untrusted JSON, so every result field defaults to
//! an empty container when absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named table: ordered column names plus ordered row records keyed
/// by column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<serde_json::Map<String, Value>>,
}

/// Input to one analysis run. Created at the start of a request and
/// discarded at the end; nothing is cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl AnalysisRequest {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.texts.is_empty() && self.notes.trim().is_empty()
    }
}

/// Chart type tag. Providers occasionally invent tags; those degrade to
/// `Other` rather than failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
    Histogram,
    #[serde(other)]
    Other,
}

/// One series of numeric values within a chart.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub values: Vec<f64>,
}

/// A renderable chart description.
///
/// `labels.len()` and each dataset's value count should match, but a
/// mismatched chart is passed through untouched: provider output is
/// untrusted and is not validated at this layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Chart {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

/// Output of one analysis run, either straight from a single backend or
/// merged across both.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub explanations: Vec<String>,
    #[serde(default)]
    pub charts: Vec<Chart>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.insights.is_empty()
            && self.explanations.is_empty()
            && self.charts.is_empty()
    }
}
