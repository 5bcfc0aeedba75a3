//! API key authentication trait and implementation.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Known API key providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyProvider {
    Zoom,
    Supabase,
}

impl ApiKeyProvider {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyProvider::Zoom => "zoom",
            ApiKeyProvider::Supabase => "supabase",
        }
    }
}

/// Authentication method for HTTP requests.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Custom header with optional prefix (e.g., "apikey: xxx")
    ApiKeyHeader {
        header_name: String,
        prefix: Option<String>,
    },
    /// Standard Bearer token
    BearerToken,
}

/// Trait for authenticating HTTP requests with API keys or bearer tokens.
///
/// Implementations handle provider-specific authentication patterns like:
/// - Supabase: `apikey: xxx`
/// - Zoom: `Authorization: Bearer xxx`
pub trait ProviderAuth: Send + Sync {
    /// Get the provider identifier.
    fn provider(&self) -> ApiKeyProvider;

    /// Get the authentication method used by this provider.
    fn auth_method(&self) -> AuthMethod;

    /// Apply authentication to a request builder.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// API key authentication implementation.
///
/// Supports custom header names and prefixes for various provider authentication patterns.
///
/// # Examples
///
/// ```rust,ignore
/// // Supabase: apikey: xxx (no prefix)
/// let auth = ApiKeyAuth::new(
///     ApiKeyProvider::Supabase,
///     SecretString::from("api_key_here".to_string()),
///     "",
/// );
/// ```
#[derive(Debug)]
pub struct ApiKeyAuth {
    provider: ApiKeyProvider,
    api_key: SecretString,
    header_name: String,
    prefix: Option<String>,
}

impl ApiKeyAuth {
    /// Create a new API key authenticator.
    ///
    /// # Arguments
    ///
    /// * `provider` - The API provider
    /// * `api_key` - The API key (stored securely)
    /// * `prefix` - Optional prefix for the authorization value (e.g., "Bearer")
    pub fn new(provider: ApiKeyProvider, api_key: SecretString, prefix: &str) -> Self {
        let (header_name, prefix_opt) = match provider {
            ApiKeyProvider::Zoom => ("Authorization".to_string(), Some(prefix.to_string())),
            ApiKeyProvider::Supabase => ("apikey".to_string(), None),
        };

        Self {
            provider,
            api_key,
            header_name,
            prefix: prefix_opt.filter(|p| !p.is_empty()),
        }
    }

    /// Get a reference to the API key.
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}

impl ProviderAuth for ApiKeyAuth {
    fn provider(&self) -> ApiKeyProvider {
        self.provider
    }

    fn auth_method(&self) -> AuthMethod {
        AuthMethod::ApiKeyHeader {
            header_name: self.header_name.clone(),
            prefix: self.prefix.clone(),
        }
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        let auth_value = if let Some(prefix) = &self.prefix {
            format!("{} {}", prefix, self.api_key.expose_secret())
        } else {
            self.api_key.expose_secret().to_string()
        };

        request.header(&self.header_name, auth_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_provider_as_str() {
        assert_eq!(ApiKeyProvider::Zoom.as_str(), "zoom");
        assert_eq!(ApiKeyProvider::Supabase.as_str(), "supabase");
    }

    #[test]
    fn test_api_key_auth_creation() {
        let api_key = SecretString::from("test_key".to_string());
        let auth = ApiKeyAuth::new(ApiKeyProvider::Zoom, api_key, "Bearer");

        assert_eq!(auth.provider(), ApiKeyProvider::Zoom);
        assert_eq!(auth.header_name, "Authorization");
        assert_eq!(auth.prefix, Some("Bearer".to_string()));
    }

    #[test]
    fn test_supabase_auth_no_prefix() {
        let api_key = SecretString::from("test_key".to_string());
        let auth = ApiKeyAuth::new(ApiKeyProvider::Supabase, api_key, "");

        assert_eq!(auth.provider(), ApiKeyProvider::Supabase);
        assert_eq!(auth.header_name, "apikey");
        assert_eq!(auth.prefix, None);
    }
}
