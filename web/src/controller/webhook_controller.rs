//! Controller for handling webhooks from the meeting provider.
//!
//! The raw body is captured before any JSON parsing: the signature is
//! computed over the exact bytes received, so re-serializing a parsed body
//! would silently break authentication.

use std::collections::HashMap;

use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use log::*;
use meeting_auth::webhook::{HmacWebhookValidator, WebhookValidator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header carrying the base64 HMAC signature.
const SIGNATURE_HEADER: &str = "x-zm-signature";

/// Provider event envelope.
#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    /// The event name, e.g. `meeting.started`
    pub event: String,
    /// Opaque event payload
    #[serde(default)]
    pub payload: Value,
}

/// Response for webhook acknowledgment
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
}

/// POST /zoom-webhook
///
/// Verifies the HMAC signature over the raw body before anything else runs;
/// a request that fails verification causes no side effects.
#[utoipa::path(
    post,
    path = "/zoom-webhook",
    request_body(content = String, description = "Signed event envelope: {event, payload}"),
    responses(
        (status = 200, description = "Event verified and dispatched"),
        (status = 400, description = "Verified but unparseable envelope"),
        (status = 401, description = "Signature missing or invalid"),
        (status = 500, description = "Webhook secret not configured")
    )
)]
pub async fn zoom_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let secret = match app_state.config.zoom_event_secret() {
        Some(secret) => secret,
        None => {
            error!("Webhook secret is not configured; rejecting event");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse {
                    status: "unconfigured".to_string(),
                }),
            );
        }
    };

    let validator =
        HmacWebhookValidator::new("zoom".to_string(), secret, SIGNATURE_HEADER.to_string());

    let header_map: HashMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    match validator.validate(&header_map, &body) {
        Ok(true) => {}
        Ok(false) => {
            warn!("Webhook signature mismatch");
            return (
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse {
                    status: "unauthorized".to_string(),
                }),
            );
        }
        Err(e) => {
            warn!("Webhook signature rejected: {:?}", e);
            return (
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse {
                    status: "unauthorized".to_string(),
                }),
            );
        }
    }

    let envelope: WebhookEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Unparseable webhook envelope: {:?}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse {
                    status: "invalid".to_string(),
                }),
            );
        }
    };

    dispatch(&envelope);

    (
        StatusCode::OK,
        Json(WebhookResponse {
            status: "ok".to_string(),
        }),
    )
}

/// Route a verified event by name.
///
/// Meeting records are write-once in this system, so lifecycle events are
/// acknowledged and logged without touching the store.
fn dispatch(envelope: &WebhookEnvelope) {
    match envelope.event.as_str() {
        "meeting.started" => {
            info!("Meeting started: {}", meeting_object_id(envelope));
        }
        "meeting.ended" => {
            info!("Meeting ended: {}", meeting_object_id(envelope));
        }
        _ => {
            debug!("Ignoring unhandled webhook event: {}", envelope.event);
        }
    }
}

/// The meeting id inside the event payload, whether sent as a string or a
/// number.
fn meeting_object_id(envelope: &WebhookEnvelope) -> String {
    match envelope.payload.get("object").and_then(|object| object.get("id")) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => "<unknown>".to_string(),
    }
}
