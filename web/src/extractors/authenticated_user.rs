use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use domain::error::{DomainErrorKind, InternalErrorKind};
use domain::user::{self, Identity};
use log::*;
use service::AppState;

pub(crate) struct AuthenticatedUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = RejectionType;

    // Extracts the bearer token from the Authorization header and delegates
    // validation to the store's identity endpoint. A missing or rejected
    // token stops the request before any handler or side effect runs.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .unwrap_or_default()
            .trim();

        if token.is_empty() {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization Bearer token".to_string(),
            ));
        }

        match user::validate_bearer_token(&state.config, token).await {
            Ok(Some(identity)) => Ok(AuthenticatedUser(identity)),
            Ok(None) => Err((StatusCode::UNAUTHORIZED, "Invalid token".to_string())),
            Err(err) => {
                warn!("Identity validation failed: {:?}", err);
                match err.error_kind {
                    DomainErrorKind::Internal(InternalErrorKind::Config) => Err((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Identity service is not configured".to_string(),
                    )),
                    _ => Err((
                        StatusCode::BAD_GATEWAY,
                        "Identity service unavailable".to_string(),
                    )),
                }
            }
        }
    }
}
