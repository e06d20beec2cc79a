//! Gateway application state.
//!
//! This module defines the shared state that is available to all request handlers.

use std::sync::Arc;

use crewdeck_auth::{Authenticator, SessionRegistry};
use crewdeck_directory::Directory;
use crewdeck_errlog::ErrorLog;
use crewdeck_report::{MetricsSource, ReportPipeline, Summarizer};
use crewdeck_store::JsonFileStore;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
///
/// This struct holds references to all services needed by the HTTP handlers.
pub struct GatewayState<M, G>
where
    M: MetricsSource,
    G: Summarizer,
{
    /// Registration and login checks over the credential store.
    pub auth: Arc<Authenticator<JsonFileStore>>,
    /// In-memory session registry keyed by bearer token.
    pub sessions: Arc<SessionRegistry>,
    /// The supervisor-to-agents directory.
    pub directory: Arc<Directory>,
    /// The append-only error log.
    pub errlog: Arc<ErrorLog>,
    /// The report pipeline over the metrics source and summarizer.
    pub pipeline: Arc<ReportPipeline<M, G>>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<M, G> GatewayState<M, G>
where
    M: MetricsSource,
    G: Summarizer,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(
        auth: Arc<Authenticator<JsonFileStore>>,
        sessions: Arc<SessionRegistry>,
        directory: Arc<Directory>,
        errlog: Arc<ErrorLog>,
        pipeline: Arc<ReportPipeline<M, G>>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth,
            sessions,
            directory,
            errlog,
            pipeline,
            config,
        }
    }
}

impl<M, G> Clone for GatewayState<M, G>
where
    M: MetricsSource,
    G: Summarizer,
{
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            sessions: Arc::clone(&self.sessions),
            directory: Arc::clone(&self.directory),
            errlog: Arc::clone(&self.errlog),
            pipeline: Arc::clone(&self.pipeline),
            config: self.config.clone(),
        }
    }
}
