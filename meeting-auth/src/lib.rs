//! # meeting-auth
//!
//! Single source of truth for ALL credential handling in the bridge:
//! - API key / bearer token application for outbound provider requests
//! - Server-to-server OAuth token exchange (account credentials grant)
//! - Webhook signature validation
//!
//! ## Architecture
//!
//! This crate provides the authentication foundation that other crates build upon:
//! - `domain` gateways use the credential types and token exchange for provider APIs
//! - `web` uses webhook validation before any event is parsed or dispatched
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     api_key::{ApiKeyAuth, BearerTokenAuth, ProviderAuth},
//!     oauth::AccountCredentials,
//!     webhook::{HmacWebhookValidator, WebhookValidator},
//! };
//! ```

pub mod api_key;
pub mod error;
pub mod oauth;
pub mod webhook;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
