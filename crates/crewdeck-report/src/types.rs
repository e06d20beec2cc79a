//! Report domain types.

use serde::{Deserialize, Serialize};

/// A view published by the metrics source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewInfo {
    /// Opaque view identifier.
    pub id: String,
    /// Human-readable view name.
    pub name: String,
}

/// One row of the tabular dataset returned by the metrics source.
///
/// The dataset is long-form: one row per (agent, measure) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRow {
    /// Agent name.
    pub agent: String,
    /// Measure name, e.g. `Resolution Rate`.
    pub measure: String,
    /// Measure value.
    pub value: f64,
}

/// Per-agent section of a finished report.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    /// Agent name.
    pub agent: String,
    /// Formatted stat block fed to the summarizer.
    pub stat_block: String,
    /// Generated performance summary.
    pub summary: String,
}

/// A finished report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Team-level summary, present when the selection covered the whole
    /// visible agent set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_summary: Option<String>,
    /// Per-agent sections, in agent-name order.
    pub agents: Vec<AgentReport>,
}
