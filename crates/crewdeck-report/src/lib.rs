//! Metrics fetching, pivoting, and summary generation for crewdeck.
//!
//! The report pipeline turns an agent selection into human-readable
//! summaries:
//!
//! ```text
//! ┌──────────────┐    ┌───────────┐    ┌──────────────┐
//! │ MetricsSource│───▶│   pivot   │───▶│  Summarizer  │
//! │ (BI server)  │    │ stat block│    │ (completions)│
//! └──────────────┘    └───────────┘    └──────────────┘
//! ```
//!
//! Both collaborators sit behind async traits so tests can substitute
//! canned implementations; the HTTP clients carry explicit timeouts and
//! surface timeout failures instead of hanging.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod pivot;
pub mod summarize;
pub mod types;

pub use error::{ReportError, Result};
pub use metrics::{HttpMetricsSource, MetricsSource};
pub use pipeline::{ReportConfig, ReportPipeline};
pub use pivot::{format_stat_block, pivot_rows, PivotTable};
pub use summarize::{agent_prompt, team_prompt, HttpSummarizer, Summarizer};
pub use types::{AgentReport, MetricsRow, Report, ViewInfo};
