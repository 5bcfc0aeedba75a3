use domain::user::AppUser;
use serde::Serialize;
use utoipa::ToSchema;

/// Body returned from the application user roster.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AppUsersResponse {
    #[schema(value_type = Vec<Object>)]
    pub users: Vec<AppUser>,
}
