//! Crewdeck Gateway - HTTP API for the support-team reporting dashboard.
//!
//! This is the main entry point for the gateway service. It wires the
//! credential store, agent directory, session registry, error log, and
//! report pipeline behind the public REST API.
//!
//! # Startup Failure Modes
//!
//! - A missing directory file is fatal: the failure is recorded in the
//!   error log and the process exits.
//! - A corrupt credential store is recorded in the error log and then
//!   reset to empty; all accounts must re-register.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crewdeck_auth::{AuthConfig, Authenticator, SessionRegistry};
use crewdeck_directory::Directory;
use crewdeck_errlog::{ErrorCode, ErrorLog};
use crewdeck_gateway::{create_router, GatewayConfig, GatewayState};
use crewdeck_report::{HttpMetricsSource, HttpSummarizer, ReportConfig, ReportPipeline};
use crewdeck_store::{JsonFileStore, StoreError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crewdeck=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Crewdeck Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let credentials_file =
        std::env::var("CREDENTIALS_FILE").unwrap_or_else(|_| "users.json".into());
    let directory_file =
        std::env::var("DIRECTORY_FILE").unwrap_or_else(|_| "supervisors.json".into());
    let error_log_file = std::env::var("ERROR_LOG_FILE").unwrap_or_else(|_| "error_log.txt".into());
    let required_domain = std::env::var("REQUIRED_DOMAIN").unwrap_or_else(|_| "@example.com".into());
    let admin_emails: Vec<String> = std::env::var("ADMIN_EMAILS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    let session_idle_seconds: u64 = std::env::var("SESSION_IDLE_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1800);
    let metrics_base_url =
        std::env::var("METRICS_BASE_URL").unwrap_or_else(|_| "http://localhost:9090".into());
    let summarizer_url = std::env::var("SUMMARIZER_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".into());
    let summarizer_model =
        std::env::var("SUMMARIZER_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let summarizer_api_key = std::env::var("SUMMARIZER_API_KEY").ok();

    tracing::info!(
        listen_addr = %listen_addr,
        credentials_file = %credentials_file,
        directory_file = %directory_file,
        error_log_file = %error_log_file,
        required_domain = %required_domain,
        admin_count = admin_emails.len(),
        metrics_base_url = %metrics_base_url,
        summarizer_model = %summarizer_model,
        "Gateway configuration loaded"
    );

    // The error log must exist before anything can fail loudly.
    let errlog = Arc::new(ErrorLog::new(&error_log_file));

    // Load the agent directory; a missing file is fatal.
    let directory = match Directory::load(&directory_file) {
        Ok(directory) => Arc::new(directory),
        Err(err) => {
            errlog.record(
                ErrorCode::MissingDirectory,
                &format!("Agent directory unavailable: {err}"),
            )?;
            return Err(err.into());
        }
    };
    tracing::info!(
        supervisors = directory.supervisors().len(),
        agents = directory.agents().len(),
        warnings = directory.warnings().len(),
        "Agent directory loaded"
    );

    // Open the credential store; a corrupt file is reset after logging.
    let store = match JsonFileStore::open(&credentials_file) {
        Ok(store) => Arc::new(store),
        Err(StoreError::Corrupt(detail)) => {
            tracing::error!(detail, "credential store is corrupt; resetting to empty");
            errlog.record(
                ErrorCode::CorruptStore,
                &format!("Credential store corrupt, reset to empty: {detail}"),
            )?;
            Arc::new(JsonFileStore::create_empty(&credentials_file)?)
        }
        Err(err) => return Err(err.into()),
    };

    // Wire the authentication stack
    let auth_config = AuthConfig {
        required_domain,
        admin_emails,
        session_idle_seconds,
    };
    let sessions = Arc::new(SessionRegistry::new(auth_config.session_idle_timeout()));
    let auth = Arc::new(Authenticator::new(
        store,
        Arc::clone(&directory),
        auth_config,
    ));

    // Wire the report pipeline
    let metrics = Arc::new(HttpMetricsSource::new(metrics_base_url));
    let summarizer = Arc::new(HttpSummarizer::new(
        summarizer_url,
        summarizer_model,
        summarizer_api_key,
    ));
    let pipeline = Arc::new(ReportPipeline::new(
        metrics,
        summarizer,
        ReportConfig::default(),
    ));

    // Build gateway state and configuration
    let gateway_config = GatewayConfig {
        listen_addr: listen_addr.clone(),
        ..GatewayConfig::default()
    };
    let state = GatewayState::new(auth, sessions, directory, errlog, pipeline, gateway_config);

    // Create the full router with all API endpoints
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
