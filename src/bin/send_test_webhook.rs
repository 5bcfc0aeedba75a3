//! Operational check: sign a sample event with the configured webhook
//! secret and POST it to a running bridge instance.
//!
//! The target defaults to a local instance and can be overridden with
//! `WEBHOOK_URL`.

use log::{error, info};
use meeting_auth::webhook::HmacWebhookValidator;
use serde_json::json;
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let secret = match config.zoom_event_secret() {
        Some(secret) => secret,
        None => {
            error!("ZOOM_EVENT_SECRET is not configured");
            std::process::exit(1);
        }
    };

    let url = std::env::var("WEBHOOK_URL")
        .unwrap_or_else(|_| "http://localhost:3000/zoom-webhook".to_string());

    let body = json!({
        "event": "meeting.started",
        "payload": { "object": { "id": "12345", "topic": "Test" } }
    })
    .to_string();

    let validator =
        HmacWebhookValidator::new("zoom".to_string(), secret, "x-zm-signature".to_string());
    let signature = match validator.compute_signature(body.as_bytes()) {
        Ok(signature) => signature,
        Err(e) => {
            error!("Failed to sign test event: {e:?}");
            std::process::exit(1);
        }
    };

    info!("Sending webhook to {url}");
    info!("x-zm-signature: {signature}");

    let client = reqwest::Client::new();
    match client
        .post(&url)
        .header("content-type", "application/json")
        .header("x-zm-signature", signature)
        .body(body)
        .send()
        .await
    {
        Ok(response) => {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            info!("Status {status}");
            info!("Body: {text}");
        }
        Err(e) => {
            error!("Request failed: {e:?}");
            std::process::exit(1);
        }
    }
}
