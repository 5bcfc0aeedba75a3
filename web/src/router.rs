use crate::controller::health_check_controller;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use service::AppState;
use tower_http::cors::{Any, CorsLayer};

use crate::controller::{
    jwt_controller, meeting_controller, user_controller, webhook_controller,
};
use crate::params;
use crate::response;

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Zoom Bridge API"
        ),
        paths(
            health_check_controller::health_check,
            jwt_controller::generate_sdk_token,
            meeting_controller::create,
            user_controller::index,
            webhook_controller::zoom_webhook,
        ),
        components(
            schemas(
                params::meeting::CreateMeetingParams,
                response::meeting::CreateMeetingResponse,
                response::jwt::SdkTokenResponse,
                response::user::AppUsersResponse,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "zoom_bridge", description = "Meeting provisioning bridge API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our bearer-token authentication requirement for gaining access to our
// API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state);

    Router::new()
        .merge(health_routes())
        .merge(meeting_routes(app_state.clone()))
        .merge(jwt_routes(app_state.clone()))
        .merge(app_user_routes(app_state.clone()))
        .merge(webhook_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn meeting_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/create-zoom-meeting", post(meeting_controller::create))
        .with_state(app_state)
}

fn jwt_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/sdk-token", post(jwt_controller::generate_sdk_token))
        .with_state(app_state)
}

fn app_user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/app-users", get(user_controller::index))
        .with_state(app_state)
}

fn webhook_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/zoom-webhook", post(webhook_controller::zoom_webhook))
        .with_state(app_state)
}

fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
