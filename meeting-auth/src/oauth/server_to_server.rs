//! Account-credentials grant: exchanging a server-to-server client id and
//! secret for a bearer token, authenticated with HTTP Basic auth.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use super::Tokens;
use crate::error::{oauth_error, Error, OAuthErrorKind};

/// Server-to-server OAuth credential set for a provider account.
///
/// Each `exchange` call performs a fresh token request; no token is cached
/// or refreshed by this type.
pub struct AccountCredentials {
    client_id: String,
    client_secret: SecretString,
    account_id: Option<String>,
    token_url: String,
    http_client: reqwest::Client,
}

impl AccountCredentials {
    /// Create a new credential set.
    ///
    /// # Arguments
    ///
    /// * `client_id` - OAuth client id
    /// * `client_secret` - OAuth client secret
    /// * `account_id` - Account to scope the token to, when the provider requires it
    /// * `oauth_base_url` - Base URL of the provider's OAuth endpoints
    pub fn new(
        client_id: String,
        client_secret: SecretString,
        account_id: Option<String>,
        oauth_base_url: &str,
    ) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client_id,
            client_secret,
            account_id,
            token_url: format!("{}/token", oauth_base_url.trim_end_matches('/')),
            http_client,
        })
    }

    /// Exchange the credentials for a bearer token.
    ///
    /// A non-success answer from the token endpoint carries the provider's
    /// error body so callers can surface it for diagnostics.
    pub async fn exchange(&self) -> Result<Tokens, Error> {
        let mut form: Vec<(&str, &str)> = vec![("grant_type", "account_credentials")];
        if let Some(account_id) = &self.account_id {
            form.push(("account_id", account_id));
        }

        debug!("Exchanging account credentials for an access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&form)
            .send()
            .await?;

        if response.status().is_success() {
            let tokens: Tokens = response.json().await.map_err(|e| {
                warn!("Failed to parse token endpoint response: {:?}", e);
                oauth_error(
                    OAuthErrorKind::InvalidResponse,
                    "Invalid token endpoint response",
                )
            })?;
            debug!("Token exchange succeeded");
            Ok(tokens)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Token exchange rejected: {}", error_text);
            Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                &error_text,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    fn basic_header(id: &str, secret: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{id}:{secret}")))
    }

    #[tokio::test]
    async fn test_exchange_success() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/token")
            .match_header("authorization", basic_header("client-1", "hunter2").as_str())
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded(
                    "grant_type".to_string(),
                    "account_credentials".to_string(),
                ),
                mockito::Matcher::UrlEncoded("account_id".to_string(), "acct-9".to_string()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"access_token":"tok-123","token_type":"bearer","expires_in":3599,"scope":"meeting:write:admin"}"#,
            )
            .create_async()
            .await;

        let credentials = AccountCredentials::new(
            "client-1".to_string(),
            SecretString::from("hunter2".to_string()),
            Some("acct-9".to_string()),
            &server.url(),
        )
        .unwrap();

        let tokens = credentials.exchange().await.unwrap();
        assert_eq!(tokens.access_token, "tok-123");
        assert_eq!(tokens.expires_in, 3599);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exchange_without_account_id() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::Regex(
                "^grant_type=account_credentials$".to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"access_token":"tok-456","token_type":"bearer","expires_in":3600}"#)
            .create_async()
            .await;

        let credentials = AccountCredentials::new(
            "client-1".to_string(),
            SecretString::from("hunter2".to_string()),
            None,
            &server.url(),
        )
        .unwrap();

        let tokens = credentials.exchange().await.unwrap();
        assert_eq!(tokens.access_token, "tok-456");
        assert_eq!(tokens.scope, "");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exchange_failure_carries_provider_body() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"reason":"Invalid client_id or client_secret","error":"invalid_client"}"#)
            .create_async()
            .await;

        let credentials = AccountCredentials::new(
            "client-1".to_string(),
            SecretString::from("wrong".to_string()),
            None,
            &server.url(),
        )
        .unwrap();

        let err = credentials.exchange().await.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
        let detail = err.source.unwrap().to_string();
        assert!(detail.contains("invalid_client"));
    }
}
