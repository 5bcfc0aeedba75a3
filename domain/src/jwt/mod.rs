//! This module provides functionality for handling JSON Web Tokens (JWTs) within the domain layer.
//!
//! The primary use case is issuing short-lived signed tokens for the native
//! meeting SDK: a caller whose identity has already been validated receives a
//! token carrying the SDK application key, signed with the application
//! secret. The token is signed, not encrypted.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use log::*;
use serde::Serialize;
use service::config::Config;

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use claims::SdkTokenClaims;

pub(crate) mod claims;

/// Issued token lifetime in seconds.
const TOKEN_TTL_SECONDS: i64 = 3600;

/// A signed SDK token.
#[derive(Debug, Serialize)]
pub struct Jwt {
    pub token: String,
}

/// Issue a signed token for the native meeting SDK, valid from now.
pub fn generate_sdk_token(config: &Config) -> Result<Jwt, Error> {
    issue_at(config, Utc::now().timestamp())
}

/// Issue a token with an explicit issued-at instant.
///
/// `exp` and `tokenExp` are always exactly [`TOKEN_TTL_SECONDS`] past `iat`.
pub fn issue_at(config: &Config, iat: i64) -> Result<Jwt, Error> {
    let app_key = config.zoom_sdk_app_key().ok_or_else(|| {
        warn!("SDK app key is not configured");
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    })?;
    let app_secret = config.zoom_sdk_app_secret().ok_or_else(|| {
        warn!("SDK app secret is not configured");
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    })?;

    let token_exp = iat + TOKEN_TTL_SECONDS;
    let claims = SdkTokenClaims {
        app_key,
        iat,
        exp: token_exp,
        token_exp,
    };

    // Encode the claims into a JWT (HS256)
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app_secret.as_bytes()),
    )?;

    Ok(Jwt { token })
}
