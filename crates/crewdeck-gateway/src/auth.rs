//! Authentication middleware and extractors.
//!
//! This module provides the `SessionUser` extractor that resolves bearer
//! tokens against the session registry.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crewdeck_core::SessionToken;
use crewdeck_report::{MetricsSource, Summarizer};

use crate::error::ApiError;
use crate::state::GatewayState;

/// An authenticated user extracted from a session token.
///
/// This extractor validates the `Authorization: Bearer <token>` header
/// against the session registry; presenting the token also refreshes the
/// session's idle clock.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The token presented with this request.
    pub token: SessionToken,
    /// The authenticated email.
    pub email: String,
    /// Whether the identity is in the fixed admin allow-list.
    pub is_admin: bool,
}

impl<M, G> FromRequestParts<Arc<GatewayState<M, G>>> for SessionUser
where
    M: MetricsSource + 'static,
    G: Summarizer + 'static,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<GatewayState<M, G>>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Extract the Bearer token
            let token: SessionToken = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?
                .parse()
                .map_err(|_| ApiError::Unauthorized)?;

            // Unknown and idle-expired tokens are indistinguishable to the
            // caller; both demand a fresh login.
            let session = state.sessions.get(&token).ok_or(ApiError::Unauthorized)?;

            Ok(SessionUser {
                token,
                email: session.email,
                is_admin: session.is_admin,
            })
        })
    }
}
