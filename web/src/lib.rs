//! HTTP surface of the meeting bridge: router, controllers, extractors, and
//! the error-to-status mapping.

use log::*;
use tokio::net::TcpListener;

pub(crate) mod controller;
mod error;
pub(crate) mod extractors;
pub(crate) mod params;
pub(crate) mod response;
mod router;

pub use error::{Error, Result};
pub use router::define_routes;
pub use service::AppState;

/// Bind the configured interface and port and serve the router until the
/// process is stopped.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let address = format!("{interface}:{port}");

    let listener = TcpListener::bind(&address).await?;
    info!("Listening on http://{address}");

    axum::serve(listener, router::define_routes(app_state)).await
}
