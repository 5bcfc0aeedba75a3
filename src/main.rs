use log::{error, warn};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let report = config.startup_report();
    for issue in &report.degraded {
        warn!("Degraded: {issue}");
    }
    if report.is_fatal() {
        for issue in &report.fatal {
            error!("Fatal configuration issue: {issue}");
        }
        std::process::exit(1);
    }

    let app_state = AppState::new(config);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server terminated: {e}");
        std::process::exit(1);
    }
}
