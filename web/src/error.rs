use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Maps each domain error kind onto the HTTP status the route contract
// promises. Upstream detail travels in the body so callers and operators can
// reconcile failures without reading server logs.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Config => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "service is not configured for this operation"})),
                )
                    .into_response(),
                InternalErrorKind::Validation(detail) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "invalid request", "details": detail})),
                )
                    .into_response(),
                InternalErrorKind::Other(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "internal error"})),
                )
                    .into_response(),
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Unauthenticated => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": "invalid token"})),
                )
                    .into_response(),
                ExternalErrorKind::Network => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({"error": "upstream service unreachable"})),
                )
                    .into_response(),
                ExternalErrorKind::Provider(detail) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "meeting provider rejected the request",
                        "details": detail,
                    })),
                )
                    .into_response(),
                ExternalErrorKind::Store(detail) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "store operation failed", "details": detail})),
                )
                    .into_response(),
                ExternalErrorKind::PartialProvision { zoom_id, detail } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "meeting created upstream but not recorded",
                        "zoom_id": zoom_id,
                        "details": detail,
                    })),
                )
                    .into_response(),
                ExternalErrorKind::Other(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "internal error"})),
                )
                    .into_response(),
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
