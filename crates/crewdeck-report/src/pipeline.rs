//! The report pipeline.
//!
//! Orchestrates the metrics source, the pivot, and the summarizer into a
//! finished report: per-agent stat blocks with generated summaries, plus a
//! team-level summary when the selection covers the whole visible set.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{ReportError, Result};
use crate::metrics::MetricsSource;
use crate::pivot::{format_stat_block, pivot_rows};
use crate::summarize::{agent_prompt, team_prompt, Summarizer};
use crate::types::{AgentReport, Report};

/// Number of stat blocks sampled into the team prompt.
const TEAM_SAMPLE_BLOCKS: usize = 3;

/// Configuration for the report pipeline.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Case-insensitive fragment used to pick the view to query.
    pub view_name_filter: String,
    /// Label naming the team in the team-summary prompt.
    pub team_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            view_name_filter: "Team Metrics".to_string(),
            team_label: "the support team".to_string(),
        }
    }
}

/// Produces reports from the metrics source and the summarizer.
pub struct ReportPipeline<M, G> {
    metrics: Arc<M>,
    summarizer: Arc<G>,
    config: ReportConfig,
}

impl<M, G> ReportPipeline<M, G>
where
    M: MetricsSource,
    G: Summarizer,
{
    /// Create a pipeline over the given collaborators.
    #[must_use]
    pub fn new(metrics: Arc<M>, summarizer: Arc<G>, config: ReportConfig) -> Self {
        Self {
            metrics,
            summarizer,
            config,
        }
    }

    /// Run a report for `selected` agents.
    ///
    /// `visible` is the caller's full visible agent set; a team summary is
    /// generated only when the selection covers all of it.
    ///
    /// # Errors
    ///
    /// Returns `NoSelection` before any external call if `selected` is
    /// empty, `ViewNotFound` if no view matches the configured fragment,
    /// `NoData` if the dataset has no rows for the selection, and the
    /// metrics/summarizer error kinds for external failures.
    pub async fn run(&self, selected: &[String], visible: &[String]) -> Result<Report> {
        if selected.is_empty() {
            return Err(ReportError::NoSelection);
        }

        let view = self.find_view().await?;
        tracing::info!(view_id = %view.id, view_name = %view.name, "running report");

        let rows = self.metrics.query_view(&view.id).await?;

        let selected_set: BTreeSet<String> = selected.iter().cloned().collect();
        let table = pivot_rows(&rows, &selected_set);
        if table.is_empty() {
            return Err(ReportError::NoData);
        }

        let blocks: Vec<(String, String)> = table
            .iter()
            .map(|(agent, measures)| (agent.clone(), format_stat_block(measures)))
            .collect();

        let visible_set: BTreeSet<String> = visible.iter().cloned().collect();
        let team_summary = if selected_set == visible_set {
            let sample = blocks
                .iter()
                .take(TEAM_SAMPLE_BLOCKS)
                .map(|(agent, block)| format!("{agent}:\n{block}"))
                .collect::<Vec<_>>()
                .join("\n\n");
            let prompt = team_prompt(&self.config.team_label, &sample);
            Some(self.summarizer.complete(&prompt).await?)
        } else {
            None
        };

        let mut agents = Vec::with_capacity(blocks.len());
        for (agent, stat_block) in blocks {
            let summary = self
                .summarizer
                .complete(&agent_prompt(&agent, &stat_block))
                .await?;
            agents.push(AgentReport {
                agent,
                stat_block,
                summary,
            });
        }

        Ok(Report {
            team_summary,
            agents,
        })
    }

    /// Find the first view whose name contains the configured fragment.
    async fn find_view(&self) -> Result<crate::types::ViewInfo> {
        let needle = self.config.view_name_filter.to_lowercase();
        let views = self.metrics.list_views().await?;
        views
            .into_iter()
            .find(|v| v.name.to_lowercase().contains(&needle))
            .ok_or_else(|| ReportError::ViewNotFound(self.config.view_name_filter.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetricsRow, ViewInfo};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct FakeMetrics {
        views: Vec<ViewInfo>,
        rows: Vec<MetricsRow>,
    }

    #[async_trait]
    impl MetricsSource for FakeMetrics {
        async fn list_views(&self) -> Result<Vec<ViewInfo>> {
            Ok(self.views.clone())
        }

        async fn query_view(&self, _view_id: &str) -> Result<Vec<MetricsRow>> {
            Ok(self.rows.clone())
        }
    }

    struct FakeSummarizer {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            Ok(format!("summary #{}", self.prompts.lock().len()))
        }
    }

    fn row(agent: &str, measure: &str, value: f64) -> MetricsRow {
        MetricsRow {
            agent: agent.to_string(),
            measure: measure.to_string(),
            value,
        }
    }

    fn pipeline(rows: Vec<MetricsRow>) -> (ReportPipeline<FakeMetrics, FakeSummarizer>, Arc<FakeSummarizer>) {
        let metrics = Arc::new(FakeMetrics {
            views: vec![
                ViewInfo {
                    id: "v0".to_string(),
                    name: "Backlog".to_string(),
                },
                ViewInfo {
                    id: "v1".to_string(),
                    name: "Weekly team metrics".to_string(),
                },
            ],
            rows,
        });
        let summarizer = Arc::new(FakeSummarizer {
            prompts: Mutex::new(Vec::new()),
        });
        (
            ReportPipeline::new(metrics, Arc::clone(&summarizer), ReportConfig::default()),
            summarizer,
        )
    }

    #[tokio::test]
    async fn empty_selection_fails_before_external_calls() {
        let (pipeline, summarizer) = pipeline(vec![row("Alice", "Tickets Closed", 1.0)]);
        let err = pipeline.run(&[], &["Alice".to_string()]).await.unwrap_err();
        assert!(matches!(err, ReportError::NoSelection));
        assert!(summarizer.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn full_selection_includes_team_summary() {
        let (pipeline, summarizer) = pipeline(vec![
            row("Alice", "Tickets Closed", 42.0),
            row("Bob", "Tickets Closed", 17.0),
        ]);
        let team: Vec<String> = vec!["Alice".to_string(), "Bob".to_string()];

        let report = pipeline.run(&team, &team).await.unwrap();
        assert!(report.team_summary.is_some());
        assert_eq!(report.agents.len(), 2);
        assert_eq!(report.agents[0].agent, "Alice");
        assert!(report.agents[0].stat_block.contains("Tickets Closed"));

        // Team prompt first, then one prompt per agent.
        assert_eq!(summarizer.prompts.lock().len(), 3);
    }

    #[tokio::test]
    async fn partial_selection_skips_team_summary() {
        let (pipeline, _) = pipeline(vec![
            row("Alice", "Tickets Closed", 42.0),
            row("Bob", "Tickets Closed", 17.0),
        ]);
        let visible: Vec<String> = vec!["Alice".to_string(), "Bob".to_string()];

        let report = pipeline.run(&["Alice".to_string()], &visible).await.unwrap();
        assert!(report.team_summary.is_none());
        assert_eq!(report.agents.len(), 1);
    }

    #[tokio::test]
    async fn no_rows_for_selection_is_no_data() {
        let (pipeline, _) = pipeline(vec![row("Eve", "Tickets Closed", 9.0)]);
        let err = pipeline
            .run(&["Alice".to_string()], &["Alice".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::NoData));
    }

    #[tokio::test]
    async fn missing_view_is_view_not_found() {
        let metrics = Arc::new(FakeMetrics {
            views: vec![ViewInfo {
                id: "v0".to_string(),
                name: "Backlog".to_string(),
            }],
            rows: Vec::new(),
        });
        let summarizer = Arc::new(FakeSummarizer {
            prompts: Mutex::new(Vec::new()),
        });
        let pipeline = ReportPipeline::new(metrics, summarizer, ReportConfig::default());

        let err = pipeline
            .run(&["Alice".to_string()], &["Alice".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::ViewNotFound(_)));
    }
}
