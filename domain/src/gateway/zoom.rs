//! Zoom API client for meeting provisioning.
//!
//! This module provides an HTTP client for the Zoom REST API: acquiring a
//! server-to-server access token, creating scheduled meetings, and listing
//! the account's users.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use chrono::{DateTime, Utc};
use log::*;
use meeting_auth::api_key::{ApiKeyProvider, BearerTokenAuth, ProviderAuth};
use meeting_auth::oauth::{AccountCredentials, Tokens};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::config::Config;

/// Scheduled meeting type in the Zoom API.
const MEETING_TYPE_SCHEDULED: u8 = 2;

/// Request to create a meeting
#[derive(Debug, Serialize)]
pub struct CreateMeetingRequest {
    pub topic: String,
    #[serde(rename = "type")]
    pub meeting_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    pub duration: u32,
    pub timezone: String,
}

impl CreateMeetingRequest {
    /// Build a scheduled-meeting request.
    pub fn scheduled(
        topic: String,
        start_time: Option<DateTime<Utc>>,
        duration: u32,
        timezone: String,
    ) -> Self {
        Self {
            topic,
            meeting_type: MEETING_TYPE_SCHEDULED,
            start_time,
            duration,
            timezone,
        }
    }
}

/// Meeting lifecycle status reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Started,
    Ended,
    Test,
}

/// Typed view of a created meeting.
///
/// Every field except the id is optional: the provider is free to omit any
/// of them and the orchestrator falls back to the caller-supplied value.
#[derive(Debug, Deserialize)]
pub struct MeetingResponse {
    #[serde(default, deserialize_with = "super::id_as_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub join_url: Option<String>,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status: Option<MeetingStatus>,
    #[serde(default)]
    pub settings: Option<Value>,
}

/// A created meeting: the typed view plus the provider's payload verbatim.
#[derive(Debug)]
pub struct CreatedMeeting {
    pub meeting: MeetingResponse,
    pub raw: Value,
}

/// Account user entry
#[derive(Debug, Deserialize)]
pub struct ZoomUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, rename = "type")]
    pub user_type: Option<i32>,
}

/// Account user listing
#[derive(Debug, Deserialize)]
pub struct UsersListResponse {
    #[serde(default)]
    pub users: Vec<ZoomUser>,
    #[serde(default)]
    pub total_records: Option<i64>,
}

/// Zoom API client
pub struct ZoomClient {
    client: reqwest::Client,
    base_url: String,
    oauth_base_url: String,
}

impl ZoomClient {
    /// Create a new Zoom client from the configured base URLs
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.zoom_api_base_url().trim_end_matches('/').to_string(),
            oauth_base_url: config.zoom_oauth_base_url().to_string(),
        })
    }

    /// Exchange the configured server-to-server credentials for a bearer token.
    pub async fn acquire_access_token(&self, config: &Config) -> Result<Tokens, Error> {
        let (client_id, client_secret) =
            match (config.zoom_client_id(), config.zoom_client_secret()) {
                (Some(id), Some(secret)) => (id, secret),
                _ => {
                    warn!("Zoom server-to-server credentials are not configured");
                    return Err(Error {
                        source: None,
                        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
                    });
                }
            };

        let credentials = AccountCredentials::new(
            client_id,
            SecretString::from(client_secret),
            config.zoom_account_id(),
            &self.oauth_base_url,
        )?;

        Ok(credentials.exchange().await?)
    }

    /// Create a meeting under the account owner's user.
    ///
    /// The provider can answer 200 with an error body; the meeting id is the
    /// only reliable success signal, so its absence is failure regardless of
    /// the HTTP status.
    pub async fn create_meeting(
        &self,
        bearer_token: &str,
        request: &CreateMeetingRequest,
    ) -> Result<CreatedMeeting, Error> {
        let url = format!("{}/users/me/meetings", self.base_url);
        let auth = BearerTokenAuth::new(
            ApiKeyProvider::Zoom,
            SecretString::from(bearer_token.to_string()),
        );

        debug!("Creating Zoom meeting: {}", request.topic);

        let response = auth
            .authenticate(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach the Zoom API: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let raw: Value = serde_json::from_str(&body).map_err(|_| {
            warn!("Zoom returned a non-JSON body ({}): {}", status, body);
            Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(body.clone())),
            }
        })?;

        if raw.get("id").map_or(true, Value::is_null) {
            warn!("Zoom did not return a meeting id ({}): {}", status, raw);
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(raw.to_string())),
            });
        }

        let meeting: MeetingResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            warn!("Zoom meeting payload failed schema validation: {:?}", e);
            let message = format!("malformed meeting payload: {e}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(message)),
            }
        })?;

        info!(
            "Created Zoom meeting {}",
            meeting.id.as_deref().unwrap_or("<unknown>")
        );
        Ok(CreatedMeeting { meeting, raw })
    }

    /// List the users of the account.
    pub async fn list_users(&self, bearer_token: &str) -> Result<UsersListResponse, Error> {
        let url = format!("{}/users", self.base_url);
        let auth = BearerTokenAuth::new(
            ApiKeyProvider::Zoom,
            SecretString::from(bearer_token.to_string()),
        );

        let response = auth
            .authenticate(self.client.get(&url))
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to list Zoom users: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let users: UsersListResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse Zoom user listing: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(
                        "malformed user listing".to_string(),
                    )),
                }
            })?;
            Ok(users)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Zoom user listing rejected: {}", error_text);
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(error_text)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn test_config(args: &[&str]) -> Config {
        let mut argv = vec!["zoom-bridge"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[tokio::test]
    async fn test_create_meeting_success_with_numeric_id() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&["--zoom-api-base-url", &server.url()]);

        let mock = server
            .mock("POST", "/users/me/meetings")
            .match_header("authorization", "Bearer tok-123")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "topic": "Sprint review",
                "type": 2,
                "duration": 30,
                "timezone": "America/Santiago",
            })))
            .with_status(201)
            .with_body(
                r#"{
                    "id": 85746065,
                    "topic": "Sprint review",
                    "start_time": "2026-08-10T15:00:00Z",
                    "duration": 30,
                    "timezone": "America/Santiago",
                    "join_url": "https://example.zoom.us/j/85746065",
                    "start_url": "https://example.zoom.us/s/85746065",
                    "password": "abc123",
                    "status": "scheduled",
                    "settings": {"waiting_room": true}
                }"#,
            )
            .create_async()
            .await;

        let client = ZoomClient::new(&config).unwrap();
        let request = CreateMeetingRequest::scheduled(
            "Sprint review".to_string(),
            None,
            30,
            "America/Santiago".to_string(),
        );

        let created = client.create_meeting("tok-123", &request).await.unwrap();
        assert_eq!(created.meeting.id.as_deref(), Some("85746065"));
        assert_eq!(created.meeting.status, Some(MeetingStatus::Scheduled));
        assert_eq!(created.raw["join_url"], "https://example.zoom.us/j/85746065");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_meeting_accepts_string_id() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&["--zoom-api-base-url", &server.url()]);

        let _mock = server
            .mock("POST", "/users/me/meetings")
            .with_status(200)
            .with_body(r#"{"id": "123", "join_url": "u"}"#)
            .create_async()
            .await;

        let client = ZoomClient::new(&config).unwrap();
        let request =
            CreateMeetingRequest::scheduled("t".to_string(), None, 30, "UTC".to_string());

        let created = client.create_meeting("tok", &request).await.unwrap();
        assert_eq!(created.meeting.id.as_deref(), Some("123"));
    }

    #[tokio::test]
    async fn test_create_meeting_missing_id_is_failure_even_on_200() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&["--zoom-api-base-url", &server.url()]);

        let _mock = server
            .mock("POST", "/users/me/meetings")
            .with_status(200)
            .with_body(r#"{"code": 124, "message": "Invalid access token"}"#)
            .create_async()
            .await;

        let client = ZoomClient::new(&config).unwrap();
        let request =
            CreateMeetingRequest::scheduled("t".to_string(), None, 30, "UTC".to_string());

        let err = client.create_meeting("tok", &request).await.unwrap_err();
        match err.error_kind {
            DomainErrorKind::External(ExternalErrorKind::Provider(detail)) => {
                assert!(detail.contains("Invalid access token"));
            }
            other => panic!("Expected Provider error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_acquire_access_token_without_credentials_is_config_error() {
        let server = mockito::Server::new_async().await;
        let config = test_config(&["--zoom-oauth-base-url", &server.url()]);

        let client = ZoomClient::new(&config).unwrap();
        let err = client.acquire_access_token(&config).await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );
    }

    #[tokio::test]
    async fn test_acquire_access_token_exchanges_credentials() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&[
            "--zoom-oauth-base-url",
            &server.url(),
            "--zoom-client-id",
            "client-1",
            "--zoom-client-secret",
            "hunter2",
            "--zoom-account-id",
            "acct-9",
        ]);

        let mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::UrlEncoded(
                "account_id".to_string(),
                "acct-9".to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"access_token":"fresh","token_type":"bearer","expires_in":3599}"#)
            .create_async()
            .await;

        let client = ZoomClient::new(&config).unwrap();
        let tokens = client.acquire_access_token(&config).await.unwrap();
        assert_eq!(tokens.access_token, "fresh");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut server = mockito::Server::new_async().await;
        let config = test_config(&["--zoom-api-base-url", &server.url()]);

        let _mock = server
            .mock("GET", "/users")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(
                r#"{
                    "total_records": 1,
                    "users": [
                        {"id": "u-1", "email": "ada@example.com", "first_name": "Ada", "type": 2}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = ZoomClient::new(&config).unwrap();
        let roster = client.list_users("tok").await.unwrap();
        assert_eq!(roster.users.len(), 1);
        assert_eq!(roster.users[0].email, "ada@example.com");
        assert_eq!(roster.users[0].last_name, None);
    }
}
