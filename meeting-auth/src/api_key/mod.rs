//! API key authentication for service providers.
//!
//! Provides traits and implementations for applying credentials to outbound
//! requests, covering both standard bearer tokens and providers that expect
//! the key in a custom header.

mod auth;
mod bearer;

pub use auth::{ApiKeyAuth, ApiKeyProvider, AuthMethod, ProviderAuth};
pub use bearer::BearerTokenAuth;
