//! Meeting provisioning: the single-pass orchestration that creates a
//! meeting upstream and records it in the store.
//!
//! There are no retries anywhere in this flow. A failure after the upstream
//! call leaves an orphaned provider meeting, which is surfaced distinctly so
//! an operator can reconcile it by hand.

use chrono::{DateTime, FixedOffset, Utc};
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::config::Config;

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::supabase::SupabaseClient;
use crate::gateway::zoom::{CreateMeetingRequest, CreatedMeeting, MeetingStatus, ZoomClient};
use crate::user::Identity;

/// Fallback topic when the caller does not name the meeting.
pub const DEFAULT_TOPIC: &str = "Reunión desde app";
/// Fallback meeting length in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Validated provisioning input, produced by the request boundary.
#[derive(Debug, Clone, Default)]
pub struct MeetingSpec {
    pub topic: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub host_user_id: Option<String>,
    pub host_email: Option<String>,
    pub participant_user_ids: Vec<String>,
    pub room_id: Option<String>,
}

/// Insert payload for the meetings table.
#[derive(Debug, Clone, Serialize)]
pub struct NewMeetingRecord {
    pub zoom_id: String,
    pub room_id: Option<String>,
    pub topic: String,
    pub agenda: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: u32,
    pub timezone: String,
    pub join_url: Option<String>,
    pub start_url: Option<String>,
    pub passcode: Option<String>,
    pub status: MeetingStatus,
    pub recording_url: Option<String>,
    pub host_id: Option<String>,
    pub created_by: Option<String>,
    pub settings: Value,
    pub participants: Vec<String>,
}

/// Stored meeting row, as returned by the store's representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    #[serde(default, deserialize_with = "crate::gateway::id_as_string")]
    pub id: Option<String>,
    pub zoom_id: String,
    #[serde(default)]
    pub room_id: Option<String>,
    pub topic: String,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    pub duration: u32,
    pub timezone: String,
    #[serde(default)]
    pub join_url: Option<String>,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub passcode: Option<String>,
    pub status: MeetingStatus,
    #[serde(default)]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub host_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub settings: Value,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// Outcome of a successful provisioning pass: the provider's payload
/// verbatim plus the row the store handed back.
#[derive(Debug)]
pub struct ProvisionedMeeting {
    pub zoom: Value,
    pub record: MeetingRecord,
}

/// Provision a meeting for an authenticated caller.
///
/// Single pass: resolve a provider credential, create the meeting upstream,
/// map the response onto a record (defaulting omitted fields to the
/// caller-supplied values), persist it, and return both results.
pub async fn provision(
    config: &Config,
    identity: &Identity,
    spec: MeetingSpec,
) -> Result<ProvisionedMeeting, Error> {
    let zoom = ZoomClient::new(config)?;
    let bearer_token = resolve_provider_token(config, &zoom).await?;

    let request = CreateMeetingRequest::scheduled(
        spec.topic
            .clone()
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        spec.start_time,
        spec.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
        config.default_timezone().to_string(),
    );

    let created = zoom.create_meeting(&bearer_token, &request).await?;
    let record = build_record(config, identity, &spec, &created)?;

    let store = SupabaseClient::new(config)?;
    let stored = match store.insert_meeting(&record).await {
        Ok(row) => row,
        Err(err) => {
            // The upstream meeting already exists at this point and is not
            // rolled back; report the partial state with its id.
            warn!(
                "Meeting {} created upstream but not recorded: {:?}",
                record.zoom_id, err
            );
            let detail = match &err.error_kind {
                DomainErrorKind::External(ExternalErrorKind::Store(detail)) => detail.clone(),
                _ => err.to_string(),
            };
            return Err(Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::PartialProvision {
                    zoom_id: record.zoom_id.clone(),
                    detail,
                }),
            });
        }
    };

    info!(
        "Meeting {} provisioned and recorded for user {}",
        stored.zoom_id, identity.id
    );

    Ok(ProvisionedMeeting {
        zoom: created.raw,
        record: stored,
    })
}

/// Pick the provider credential for this request: the configured long-lived
/// token when present, otherwise a fresh server-to-server exchange.
async fn resolve_provider_token(config: &Config, zoom: &ZoomClient) -> Result<String, Error> {
    if let Some(token) = config.zoom_api_token() {
        return Ok(token);
    }

    if config.zoom_client_id().is_some() && config.zoom_client_secret().is_some() {
        let tokens = zoom.acquire_access_token(config).await?;
        return Ok(tokens.access_token);
    }

    warn!("No Zoom credential is configured");
    Err(Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })
}

/// Map the provider response onto an insertable record, defaulting every
/// field the provider omitted to the caller-supplied value.
fn build_record(
    config: &Config,
    identity: &Identity,
    spec: &MeetingSpec,
    created: &CreatedMeeting,
) -> Result<NewMeetingRecord, Error> {
    let meeting = &created.meeting;

    let zoom_id = meeting.id.clone().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::External(ExternalErrorKind::Provider(
            "meeting payload carried no id".to_string(),
        )),
    })?;

    Ok(NewMeetingRecord {
        zoom_id,
        room_id: spec.room_id.clone(),
        topic: meeting
            .topic
            .clone()
            .or_else(|| spec.topic.clone())
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        agenda: meeting.agenda.clone(),
        start_time: meeting.start_time.or(spec.start_time),
        duration: meeting
            .duration
            .or(spec.duration)
            .unwrap_or(DEFAULT_DURATION_MINUTES),
        timezone: meeting
            .timezone
            .clone()
            .unwrap_or_else(|| config.default_timezone().to_string()),
        join_url: meeting.join_url.clone(),
        start_url: meeting.start_url.clone(),
        passcode: meeting.password.clone(),
        status: meeting.status.unwrap_or(MeetingStatus::Scheduled),
        recording_url: None,
        host_id: Some(
            spec.host_user_id
                .clone()
                .unwrap_or_else(|| identity.id.clone()),
        ),
        created_by: Some(identity.id.clone()),
        settings: meeting
            .settings
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default())),
        participants: spec.participant_user_ids.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    fn test_identity() -> Identity {
        Identity {
            id: "user-1".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    }

    fn test_config(zoom_url: &str, supabase_url: &str) -> Config {
        Config::parse_from([
            "zoom-bridge",
            "--zoom-api-base-url",
            zoom_url,
            "--zoom-api-token",
            "long-lived-token",
            "--supabase-url",
            supabase_url,
            "--supabase-key",
            "service-key",
        ])
    }

    fn zoom_meeting_body() -> String {
        json!({
            "id": 123,
            "topic": "Sprint review",
            "start_time": "2026-08-10T15:00:00Z",
            "duration": 45,
            "timezone": "America/Santiago",
            "join_url": "u",
            "start_url": "s",
            "password": "pw",
            "settings": {"waiting_room": true}
        })
        .to_string()
    }

    fn stored_row_body() -> String {
        json!([{
            "id": 42,
            "zoom_id": "123",
            "room_id": "room-7",
            "topic": "Sprint review",
            "start_time": "2026-08-10T15:00:00Z",
            "duration": 45,
            "timezone": "America/Santiago",
            "join_url": "u",
            "start_url": "s",
            "passcode": "pw",
            "status": "scheduled",
            "host_id": "user-1",
            "created_by": "user-1",
            "settings": {"waiting_room": true},
            "participants": ["user-2"],
            "created_at": "2026-08-06T12:00:00Z"
        }])
        .to_string()
    }

    #[tokio::test]
    async fn test_provision_success_returns_raw_payload_and_stored_row() {
        let mut zoom_server = mockito::Server::new_async().await;
        let mut store_server = mockito::Server::new_async().await;
        let config = test_config(&zoom_server.url(), &store_server.url());

        let zoom_mock = zoom_server
            .mock("POST", "/users/me/meetings")
            .match_header("authorization", "Bearer long-lived-token")
            .with_status(201)
            .with_body(zoom_meeting_body())
            .create_async()
            .await;

        let insert_mock = store_server
            .mock("POST", "/rest/v1/zoom_meetings")
            .match_body(mockito::Matcher::PartialJson(json!([{
                "zoom_id": "123",
                "topic": "Sprint review",
                "duration": 45,
                "host_id": "user-1",
                "created_by": "user-1",
                "participants": ["user-2"],
            }])))
            .with_status(201)
            .with_body(stored_row_body())
            .create_async()
            .await;

        let spec = MeetingSpec {
            topic: Some("Sprint review".to_string()),
            participant_user_ids: vec!["user-2".to_string()],
            room_id: Some("room-7".to_string()),
            ..Default::default()
        };

        let provisioned = provision(&config, &test_identity(), spec).await.unwrap();

        assert_eq!(provisioned.zoom["id"], 123);
        assert_eq!(provisioned.zoom["join_url"], "u");
        assert_eq!(provisioned.record.zoom_id, "123");
        assert_eq!(provisioned.record.created_by.as_deref(), Some("user-1"));

        zoom_mock.assert_async().await;
        insert_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provision_without_id_never_touches_the_store() {
        let mut zoom_server = mockito::Server::new_async().await;
        let mut store_server = mockito::Server::new_async().await;
        let config = test_config(&zoom_server.url(), &store_server.url());

        let _zoom_mock = zoom_server
            .mock("POST", "/users/me/meetings")
            .with_status(200)
            .with_body(r#"{"code": 124, "message": "Invalid access token"}"#)
            .create_async()
            .await;

        let insert_mock = store_server
            .mock("POST", "/rest/v1/zoom_meetings")
            .expect(0)
            .create_async()
            .await;

        let err = provision(&config, &test_identity(), MeetingSpec::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Provider(_))
        ));
        insert_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provision_store_failure_is_partial() {
        let mut zoom_server = mockito::Server::new_async().await;
        let mut store_server = mockito::Server::new_async().await;
        let config = test_config(&zoom_server.url(), &store_server.url());

        let _zoom_mock = zoom_server
            .mock("POST", "/users/me/meetings")
            .with_status(201)
            .with_body(zoom_meeting_body())
            .create_async()
            .await;

        let _insert_mock = store_server
            .mock("POST", "/rest/v1/zoom_meetings")
            .with_status(500)
            .with_body(r#"{"message":"relation does not exist"}"#)
            .create_async()
            .await;

        let err = provision(&config, &test_identity(), MeetingSpec::default())
            .await
            .unwrap_err();

        match err.error_kind {
            DomainErrorKind::External(ExternalErrorKind::PartialProvision { zoom_id, detail }) => {
                assert_eq!(zoom_id, "123");
                assert!(detail.contains("relation does not exist"));
            }
            other => panic!("Expected PartialProvision, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_provision_defaults_topic_and_duration() {
        let mut zoom_server = mockito::Server::new_async().await;
        let mut store_server = mockito::Server::new_async().await;
        let config = test_config(&zoom_server.url(), &store_server.url());

        // Provider echoes nothing back except the id; every other record
        // field must come from the caller side or the defaults.
        let zoom_mock = zoom_server
            .mock("POST", "/users/me/meetings")
            .match_body(mockito::Matcher::PartialJson(json!({
                "topic": DEFAULT_TOPIC,
                "duration": DEFAULT_DURATION_MINUTES,
            })))
            .with_status(201)
            .with_body(r#"{"id": "999"}"#)
            .create_async()
            .await;

        let insert_mock = store_server
            .mock("POST", "/rest/v1/zoom_meetings")
            .match_body(mockito::Matcher::PartialJson(json!([{
                "zoom_id": "999",
                "topic": DEFAULT_TOPIC,
                "duration": DEFAULT_DURATION_MINUTES,
                "timezone": "America/Santiago",
                "status": "scheduled",
            }])))
            .with_status(201)
            .with_body(
                json!([{
                    "zoom_id": "999",
                    "topic": DEFAULT_TOPIC,
                    "duration": DEFAULT_DURATION_MINUTES,
                    "timezone": "America/Santiago",
                    "status": "scheduled",
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let provisioned = provision(&config, &test_identity(), MeetingSpec::default())
            .await
            .unwrap();
        assert_eq!(provisioned.record.zoom_id, "999");

        zoom_mock.assert_async().await;
        insert_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_identical_requests_create_independent_meetings() {
        let mut zoom_server = mockito::Server::new_async().await;
        let mut store_server = mockito::Server::new_async().await;
        let config = test_config(&zoom_server.url(), &store_server.url());

        // No deduplication anywhere: the same spec provisioned twice hits
        // the provider twice and inserts two rows.
        let zoom_mock = zoom_server
            .mock("POST", "/users/me/meetings")
            .expect(2)
            .with_status(201)
            .with_body(zoom_meeting_body())
            .create_async()
            .await;

        let insert_mock = store_server
            .mock("POST", "/rest/v1/zoom_meetings")
            .expect(2)
            .with_status(201)
            .with_body(stored_row_body())
            .create_async()
            .await;

        let spec = MeetingSpec {
            topic: Some("Sprint review".to_string()),
            ..Default::default()
        };

        provision(&config, &test_identity(), spec.clone())
            .await
            .unwrap();
        provision(&config, &test_identity(), spec).await.unwrap();

        zoom_mock.assert_async().await;
        insert_mock.assert_async().await;
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_provision_without_any_credential_is_config_error() {
        for var in ["ZOOM_API_TOKEN", "ZOOM_CLIENT_ID", "ZOOM_CLIENT_SECRET"] {
            std::env::remove_var(var);
        }
        let mut zoom_server = mockito::Server::new_async().await;
        let store_server = mockito::Server::new_async().await;

        let config = Config::parse_from([
            "zoom-bridge",
            "--zoom-api-base-url",
            &zoom_server.url(),
            "--supabase-url",
            &store_server.url(),
            "--supabase-key",
            "service-key",
        ]);

        let zoom_mock = zoom_server
            .mock("POST", "/users/me/meetings")
            .expect(0)
            .create_async()
            .await;

        let err = provision(&config, &test_identity(), MeetingSpec::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );
        zoom_mock.assert_async().await;
    }
}
