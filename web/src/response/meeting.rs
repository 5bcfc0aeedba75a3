use domain::meeting::MeetingRecord;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Body returned from a successful provisioning request: the provider's
/// payload verbatim plus the row recorded in the store.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreateMeetingResponse {
    pub message: String,
    #[schema(value_type = Object)]
    pub zoom: Value,
    #[schema(value_type = Object)]
    pub db: MeetingRecord,
}
