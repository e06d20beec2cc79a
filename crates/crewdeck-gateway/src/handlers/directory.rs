//! Directory endpoints: supervisors and visible agents.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crewdeck_errlog::ErrorCode;
use crewdeck_report::{MetricsSource, Summarizer};

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::handlers::record_failure;
use crate::state::GatewayState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Query parameters for the agents endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AgentsQuery {
    /// Comma-separated supervisor emails to union over (admin only).
    pub supervisors: Option<String>,
}

/// Response listing supervisor emails.
#[derive(Debug, Serialize)]
pub struct SupervisorsResponse {
    /// Sorted supervisor emails.
    pub supervisors: Vec<String>,
}

/// Response listing agent names.
#[derive(Debug, Serialize)]
pub struct AgentsResponse {
    /// Sorted agent names.
    pub agents: Vec<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all supervisors in the directory.
///
/// Admin only; supervisors see only their own agents, not the org chart.
///
/// # Errors
///
/// Returns `Forbidden` for non-admin callers.
pub async fn list_supervisors<M, G>(
    State(state): State<Arc<GatewayState<M, G>>>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    if !user.is_admin {
        return Err(ApiError::Forbidden(
            "supervisor listing requires admin".to_string(),
        ));
    }

    Ok(Json(SupervisorsResponse {
        supervisors: state.directory.supervisors(),
    }))
}

/// List the agents visible to the caller.
///
/// A supervisor sees their own mapped agents; an admin with no mapping
/// sees the full agent universe. Admins may instead pass
/// `?supervisors=a@x.com,b@x.com` to union specific supervisors' agents.
///
/// # Errors
///
/// Returns `Forbidden` when the caller has no agents mapped, recording
/// the failure in the error log, or when a non-admin passes `supervisors`.
pub async fn list_agents<M, G>(
    State(state): State<Arc<GatewayState<M, G>>>,
    user: SessionUser,
    Query(query): Query<AgentsQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    if let Some(supervisors) = query.supervisors {
        if !user.is_admin {
            return Err(ApiError::Forbidden(
                "supervisor filter requires admin".to_string(),
            ));
        }
        let supervisors: Vec<String> = supervisors
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        return Ok(Json(AgentsResponse {
            agents: state.directory.agents_under(&supervisors),
        }));
    }

    match state.directory.visible_agents(&user.email, user.is_admin) {
        Ok(agents) => Ok(Json(AgentsResponse { agents })),
        Err(err) => {
            record_failure(
                &state.errlog,
                ErrorCode::Unmapped,
                &format!("No agents mapped for {}", user.email),
            );
            Err(err.into())
        }
    }
}
