use serde::Serialize;
use utoipa::ToSchema;

/// Body returned from SDK token issuance.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SdkTokenResponse {
    pub token: String,
}
