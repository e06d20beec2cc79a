//! Core types and utilities for crewdeck.
//!
//! This crate provides the foundational pieces shared across the crewdeck
//! workspace:
//!
//! - **Session tokens**: the opaque bearer token handed out at login
//! - **Email helpers**: the organizational-domain check used at registration
//!
//! # Example
//!
//! ```
//! use crewdeck_core::{email, SessionToken};
//!
//! let token = SessionToken::generate();
//! assert_eq!(token.to_string().len(), 36);
//!
//! assert!(email::has_domain("sup@example.com", "@example.com"));
//! assert!(!email::has_domain("sup@elsewhere.com", "@example.com"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod email;
pub mod token;

pub use token::{SessionToken, TokenError};
