use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::meeting::CreateMeetingParams;
use crate::response::meeting::CreateMeetingResponse;
use crate::{AppState, Error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::meeting as MeetingApi;
use log::*;
use service::config::ApiVersion;

/// POST create a meeting upstream and record it
#[utoipa::path(
    post,
    path = "/create-zoom-meeting",
    params(ApiVersion),
    request_body = CreateMeetingParams,
    responses(
        (status = 200, description = "Meeting created upstream and recorded in the store", body = CreateMeetingResponse),
        (status = 400, description = "Validation failed or the provider rejected the request"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Misconfiguration or store failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(identity): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<CreateMeetingParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST create meeting for user: {}", identity.id);

    let spec = params.into_spec(app_state.config.require_meeting_fields)?;
    let provisioned = MeetingApi::provision(&app_state.config, &identity, spec).await?;

    Ok(Json(CreateMeetingResponse {
        message: "Meeting created and recorded".to_string(),
        zoom: provisioned.zoom,
        db: provisioned.record,
    }))
}
