//! Report generation endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crewdeck_errlog::ErrorCode;
use crewdeck_report::{MetricsSource, Summarizer};

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::handlers::record_failure;
use crate::state::GatewayState;

/// Request body for report generation.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    /// Agents to report on. Names outside the caller's visible set are
    /// silently dropped; an empty list means "all visible agents".
    #[serde(default)]
    pub agents: Vec<String>,
}

/// Generate a report for the selected agents.
///
/// The selection is intersected with the caller's visible agent set before
/// anything leaves the process, so a caller can never widen their scope by
/// naming agents directly.
///
/// # Errors
///
/// Returns `Forbidden` when the caller has no agents mapped,
/// `Unprocessable` when the filtered selection is empty, and upstream
/// error statuses for metrics/summarizer failures (which are also
/// recorded in the error log).
pub async fn generate<M, G>(
    State(state): State<Arc<GatewayState<M, G>>>,
    user: SessionUser,
    Json(request): Json<ReportRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    let visible = match state.directory.visible_agents(&user.email, user.is_admin) {
        Ok(agents) => agents,
        Err(err) => {
            record_failure(
                &state.errlog,
                ErrorCode::Unmapped,
                &format!("No agents mapped for {}", user.email),
            );
            return Err(err.into());
        }
    };

    let selected: Vec<String> = if request.agents.is_empty() {
        visible.clone()
    } else {
        request
            .agents
            .iter()
            .filter(|a| visible.contains(*a))
            .cloned()
            .collect()
    };

    match state.pipeline.run(&selected, &visible).await {
        Ok(report) => Ok(Json(report)),
        Err(err) => {
            if err.is_logged() {
                record_failure(
                    &state.errlog,
                    ErrorCode::ReportFailure,
                    &format!("Report error: {err}"),
                );
            }
            Err(err.into())
        }
    }
}
