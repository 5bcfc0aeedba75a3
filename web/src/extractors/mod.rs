pub(crate) mod authenticated_user;
pub(crate) mod compare_api_version;

use axum::http::StatusCode;

pub(crate) type RejectionType = (StatusCode, String);
