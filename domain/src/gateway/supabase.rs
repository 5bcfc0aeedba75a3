//! Supabase gateway: caller identity introspection and row storage.
//!
//! All state of record lives behind this client; the bridge itself keeps no
//! long-lived state. Identity checks delegate to the store's `/auth/v1/user`
//! endpoint, rows go through the REST interface.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::meeting::{MeetingRecord, NewMeetingRecord};
use crate::user::{AppUser, Identity};
use log::*;
use meeting_auth::api_key::{ApiKeyAuth, ApiKeyProvider, BearerTokenAuth, ProviderAuth};
use secrecy::SecretString;
use service::config::Config;

/// Meetings table exposed through the REST interface.
const MEETINGS_TABLE: &str = "zoom_meetings";
/// Application user roster, maintained by the mobile app. Read-only here.
const APP_USERS_TABLE: &str = "usuarios";

/// Supabase HTTP client
#[derive(Debug)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKeyAuth,
    service_bearer: BearerTokenAuth,
}

impl SupabaseClient {
    /// Create a new client from the configured project URL and service key.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let (base_url, key) = match (config.supabase_url(), config.supabase_key()) {
            (Some(url), Some(key)) => (url, key),
            _ => {
                warn!("Supabase URL or service key is not configured");
                return Err(Error {
                    source: None,
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
                });
            }
        };

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: ApiKeyAuth::new(
                ApiKeyProvider::Supabase,
                SecretString::from(key.clone()),
                "",
            ),
            service_bearer: BearerTokenAuth::new(ApiKeyProvider::Supabase, SecretString::from(key)),
        })
    }

    /// Resolve the identity behind a caller-supplied access token.
    ///
    /// A rejected token, an unparseable body, or a body without an id all
    /// mean "invalid token" and come back as `None`; only transport failures
    /// surface as errors.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<Identity>, Error> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let caller = BearerTokenAuth::new(
            ApiKeyProvider::Supabase,
            SecretString::from(access_token.to_string()),
        );

        let response = caller
            .authenticate(self.api_key.authenticate(self.client.get(&url)))
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            debug!("Identity endpoint rejected access token: {}", response.status());
            return Ok(None);
        }

        match response.json::<Identity>().await {
            Ok(identity) if !identity.id.is_empty() => Ok(Some(identity)),
            Ok(_) => {
                debug!("Identity payload carried no usable id");
                Ok(None)
            }
            Err(e) => {
                debug!("Unparseable identity payload: {:?}", e);
                Ok(None)
            }
        }
    }

    /// Insert a provisioned meeting and return the stored representation.
    pub async fn insert_meeting(&self, record: &NewMeetingRecord) -> Result<MeetingRecord, Error> {
        let url = format!("{}/rest/v1/{}", self.base_url, MEETINGS_TABLE);

        debug!("Inserting meeting row for zoom_id {}", record.zoom_id);

        let response = self
            .service_bearer
            .authenticate(self.api_key.authenticate(self.client.post(&url)))
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Meeting insert rejected ({}): {}", status, detail);
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Store(detail)),
            });
        }

        let mut rows: Vec<MeetingRecord> = response.json().await.map_err(|e| {
            warn!("Insert representation failed schema validation: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Store(
                    "malformed insert representation".to_string(),
                )),
            }
        })?;

        rows.pop().ok_or_else(|| Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Store(
                "empty insert representation".to_string(),
            )),
        })
    }

    /// Read the application user roster.
    pub async fn list_app_users(&self) -> Result<Vec<AppUser>, Error> {
        let url = format!("{}/rest/v1/{}", self.base_url, APP_USERS_TABLE);

        let response = self
            .service_bearer
            .authenticate(self.api_key.authenticate(self.client.get(&url)))
            .query(&[("select", "id,email,nombre,apellido")])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("User roster read rejected ({}): {}", status, detail);
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Store(detail)),
            });
        }

        response.json::<Vec<AppUser>>().await.map_err(|e| {
            warn!("User roster failed schema validation: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Store(
                    "malformed user roster".to_string(),
                )),
            }
        })
    }

    /// Read the most recently created meeting rows, newest first.
    pub async fn recent_meetings(&self, limit: u32) -> Result<Vec<MeetingRecord>, Error> {
        let url = format!("{}/rest/v1/{}", self.base_url, MEETINGS_TABLE);

        let response = self
            .service_bearer
            .authenticate(self.api_key.authenticate(self.client.get(&url)))
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Meeting listing rejected ({}): {}", status, detail);
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Store(detail)),
            });
        }

        response.json::<Vec<MeetingRecord>>().await.map_err(|e| {
            warn!("Meeting listing failed schema validation: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Store(
                    "malformed meeting listing".to_string(),
                )),
            }
        })
    }
}

fn network_error(err: reqwest::Error) -> Error {
    warn!("Supabase request failed: {:?}", err);
    Error {
        source: Some(Box::new(err)),
        error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
    }
}
