//! HTTP gateway for the crewdeck reporting service.
//!
//! This crate provides the public-facing API for the support-team
//! reporting dashboard. It handles:
//!
//! - Account registration and bearer-token sessions
//! - Directory queries (which agents a caller may see)
//! - Report generation over the metrics source and summarizer
//! - The admin-only error log view
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients (HTTP)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     crewdeck-gateway                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐   │
//! │  │   Session   │ │   Router    │ │    Error Log        │   │
//! │  │  Extractor  │ │  + Handlers │ │    Recording        │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┼──────────────┐
//!               ▼              ▼              ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │   Auth   │   │ Report   │   │ Metrics/ │
//!        │ + Store  │   │ Pipeline │   │Summarizer│
//!        └──────────┘   └──────────┘   └──────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;

// Re-export key types for convenience
pub use auth::SessionUser;
