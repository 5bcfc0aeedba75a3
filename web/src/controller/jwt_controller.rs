use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::response::jwt::SdkTokenResponse;
use crate::{AppState, Error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::jwt as JwtApi;
use log::*;
use service::config::ApiVersion;

/// POST generate a token for the native meeting SDK
#[utoipa::path(
    post,
    path = "/sdk-token",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully generated an SDK token", body = SdkTokenResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "SDK credentials not configured")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_sdk_token(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(identity): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST generate SDK token for user: {}", identity.id);

    let jwt = JwtApi::generate_sdk_token(&app_state.config)?;

    Ok(Json(SdkTokenResponse { token: jwt.token }))
}
