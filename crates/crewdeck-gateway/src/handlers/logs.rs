//! Admin log view endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crewdeck_errlog::{filter_by_user, load_entries, page_count, paginate, LogEntry, ALL_USERS};
use crewdeck_report::{MetricsSource, Summarizer};
use crewdeck_store::CredentialStore;

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::state::GatewayState;

/// Query parameters for the log view.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    /// Exact-match user filter; omit or pass `All` for no filtering.
    pub user: Option<String>,
    /// 1-based page, clamped to the valid range.
    pub page: Option<usize>,
}

/// One page of the error log.
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    /// The entries on this page, oldest first.
    pub entries: Vec<LogEntry>,
    /// The page actually served after clamping.
    pub page: usize,
    /// Total number of pages for the current filter.
    pub page_count: usize,
    /// Total number of matching entries.
    pub total: usize,
    /// Registered emails, for building the filter control.
    pub users: Vec<String>,
}

/// Serve one page of the error log, optionally filtered by user.
///
/// The log file is re-read on every request; entries written since the
/// last call are always visible.
///
/// # Errors
///
/// Returns `Forbidden` for non-admin callers, or an internal error if the
/// log file exists but cannot be read.
pub async fn view<M, G>(
    State(state): State<Arc<GatewayState<M, G>>>,
    user: SessionUser,
    Query(query): Query<LogsQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    if !user.is_admin {
        return Err(ApiError::Forbidden("log view requires admin".to_string()));
    }

    let users = state.auth.store().emails()?;
    let entries = load_entries(state.errlog.path(), &users, &state.directory)?;

    let filter = query.user.as_deref().unwrap_or(ALL_USERS);
    let filtered = filter_by_user(entries, filter);

    let page_size = state.config.log_page_size;
    let total = filtered.len();
    let pages = page_count(total, page_size);
    let page = query.page.unwrap_or(1).clamp(1, pages);
    let entries = paginate(&filtered, page, page_size).to_vec();

    Ok(Json(LogsResponse {
        entries,
        page,
        page_count: pages,
        total,
        users,
    }))
}
