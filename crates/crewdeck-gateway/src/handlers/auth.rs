//! Registration, login, and logout endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crewdeck_auth::AuthError;
use crewdeck_core::email;
use crewdeck_errlog::ErrorCode;
use crewdeck_report::{MetricsSource, Summarizer};

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::handlers::record_failure;
use crate::state::GatewayState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email to register.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation; must match `password`.
    pub confirm: String,
}

/// Response for a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// The registered email.
    pub email: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email to authenticate.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// The authenticated email.
    pub email: String,
    /// Whether the identity is in the fixed admin allow-list.
    pub is_admin: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new account.
///
/// Preconditions are checked in order: domain suffix, password
/// confirmation, duplicate account, directory/admin mapping. An unmapped
/// identity is recorded in the error log; pure validation failures are not.
///
/// # Errors
///
/// Returns the first failed precondition mapped to its HTTP status.
pub async fn register<M, G>(
    State(state): State<Arc<GatewayState<M, G>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    let email = email::normalize(&request.email).to_string();

    if let Err(err) = state
        .auth
        .register(&email, &request.password, &request.confirm)
    {
        if matches!(err, AuthError::Unmapped(_)) {
            record_failure(
                &state.errlog,
                ErrorCode::Unmapped,
                &format!("No agents mapped for {email}"),
            );
        }
        return Err(err.into());
    }

    Ok((StatusCode::CREATED, Json(RegisterResponse { email })))
}

/// Authenticate and open a session.
///
/// Failed logins are recorded in the error log with the attempted email.
///
/// # Errors
///
/// Returns `Unauthorized` on credential mismatch.
pub async fn login<M, G>(
    State(state): State<Arc<GatewayState<M, G>>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    let email = email::normalize(&request.email).to_string();

    let session = match state.auth.login(&email, &request.password) {
        Ok(session) => session,
        Err(err) => {
            if matches!(err, AuthError::InvalidCredentials) {
                record_failure(
                    &state.errlog,
                    ErrorCode::InvalidCredentials,
                    &format!("Login failed: {email}"),
                );
            }
            return Err(err.into());
        }
    };

    let token = state.sessions.create(&session.email, session.is_admin);
    tracing::info!(email = %session.email, is_admin = session.is_admin, "login succeeded");

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token: token.to_string(),
            email: session.email,
            is_admin: session.is_admin,
        }),
    ))
}

/// Close the current session.
///
/// # Errors
///
/// Returns `Unauthorized` if the token is missing, unknown, or expired.
pub async fn logout<M, G>(
    State(state): State<Arc<GatewayState<M, G>>>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    state.sessions.remove(&user.token);
    tracing::info!(email = %user.email, "logout");
    Ok(StatusCode::NO_CONTENT)
}
