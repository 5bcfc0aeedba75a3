//! Caller identity resolution and the application user roster.

use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

use crate::error::Error;
use crate::gateway::supabase::SupabaseClient;

/// Identity resolved from a caller's access token.
///
/// Ephemeral: validated once per request against the store's identity
/// endpoint and never persisted by this layer.
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Row from the application user roster (read-only).
///
/// The deployed table keeps its Spanish column names; they are mapped here
/// and serialized back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "nombre")]
    pub first_name: Option<String>,
    #[serde(default, rename = "apellido")]
    pub last_name: Option<String>,
}

/// Validate a bearer token by delegating to the store's identity endpoint.
///
/// `None` means the token was rejected; it is not an error. This check is
/// mandatory before any mutating operation.
pub async fn validate_bearer_token(
    config: &Config,
    access_token: &str,
) -> Result<Option<Identity>, Error> {
    if access_token.is_empty() {
        return Ok(None);
    }

    let client = SupabaseClient::new(config)?;
    let identity = client.get_user(access_token).await?;
    if identity.is_none() {
        debug!("Access token rejected by the identity endpoint");
    }
    Ok(identity)
}

/// Read the application user roster from the store.
pub async fn list_app_users(config: &Config) -> Result<Vec<AppUser>, Error> {
    SupabaseClient::new(config)?.list_app_users().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_round_trips_roster_columns() {
        let json = r#"{"id":"user-1","email":"ada@example.com","nombre":"Ada","apellido":"Lovelace"}"#;
        let user: AppUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ada"));

        // Serialization keeps the deployed column names.
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["nombre"], "Ada");
        assert_eq!(value["apellido"], "Lovelace");
        assert!(value.get("first_name").is_none());
    }
}
