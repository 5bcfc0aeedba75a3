use crate::response::user::AppUsersResponse;
use crate::{AppState, Error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::user as UserApi;
use log::*;

/// GET the application user roster
#[utoipa::path(
    get,
    path = "/app-users",
    responses(
        (status = 200, description = "Application user roster", body = AppUsersResponse),
        (status = 500, description = "Store not configured or roster read failed")
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET app users");

    let users = UserApi::list_app_users(&app_state.config).await?;

    Ok(Json(AppUsersResponse { users }))
}
