//! Server-to-server OAuth 2.0 token exchange.

mod server_to_server;

pub use server_to_server::AccountCredentials;

use serde::Deserialize;

/// Access token set returned by a token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Tokens {
    /// Bearer token for subsequent API calls.
    pub access_token: String,
    /// Token type, normally `bearer`.
    pub token_type: String,
    /// Lifetime in seconds, counted from the exchange.
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
}
