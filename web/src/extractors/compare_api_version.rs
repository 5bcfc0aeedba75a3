use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use service::config::ApiVersion;

pub(crate) struct CompareApiVersion(pub ApiVersion);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    // Requires the x-version header to name a supported API version. Routes
    // serving external callers (webhooks, health) skip this extractor.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ApiVersion::field_name())
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Missing {} header", ApiVersion::field_name()),
                )
            })?;

        let version = ApiVersion::parse_supported(value).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {value}"),
            )
        })?;

        Ok(CompareApiVersion(version))
    }
}
