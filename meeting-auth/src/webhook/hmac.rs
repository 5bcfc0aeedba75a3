//! HMAC-SHA256 webhook signature validation.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::WebhookValidator;
use crate::error::{webhook_error, Error, WebhookErrorKind};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 webhook validator.
///
/// Validates webhook signatures sent as a base64-encoded HMAC-SHA256 of the
/// raw request body. The comparison runs in constant time; signatures are
/// never compared as strings.
pub struct HmacWebhookValidator {
    provider_id: String,
    secret: String,
    signature_header: String,
}

impl HmacWebhookValidator {
    /// Create a new HMAC webhook validator.
    ///
    /// # Arguments
    ///
    /// * `provider_id` - Provider identifier
    /// * `secret` - Webhook signing secret
    /// * `signature_header` - Name of the header containing the signature
    pub fn new(provider_id: String, secret: String, signature_header: String) -> Self {
        Self {
            provider_id,
            secret,
            signature_header,
        }
    }

    /// Compute the base64 signature for a body.
    ///
    /// Used to sign outbound test events with the same scheme the validator
    /// checks.
    pub fn compute_signature(&self, body: &[u8]) -> Result<String, Error> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| webhook_error(WebhookErrorKind::InvalidPayload, "Invalid HMAC key"))?;
        mac.update(body);
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

impl WebhookValidator for HmacWebhookValidator {
    fn validate(&self, headers: &HashMap<String, String>, body: &[u8]) -> Result<bool, Error> {
        // Get the signature from headers
        let signature = headers.get(&self.signature_header).ok_or_else(|| {
            webhook_error(
                WebhookErrorKind::MissingSignature,
                &format!("Missing signature header: {}", self.signature_header),
            )
        })?;

        // Parse the base64-encoded signature
        let expected_sig = BASE64.decode(signature.trim()).map_err(|_| {
            webhook_error(WebhookErrorKind::InvalidSignature, "Invalid signature format")
        })?;

        // Compute HMAC
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| webhook_error(WebhookErrorKind::InvalidPayload, "Invalid HMAC key"))?;
        mac.update(body);

        // verify_slice is a constant-time comparison
        mac.verify_slice(&expected_sig).map(|_| true).or(Ok(false))
    }

    fn provider_id(&self) -> &str {
        &self.provider_id
    }
}
