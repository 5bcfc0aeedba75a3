//! Operational check: exchange the configured server-to-server credentials
//! and print the account's user roster.

use domain::gateway::zoom::ZoomClient;
use log::{error, info};
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let zoom = match ZoomClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build Zoom client: {e:?}");
            std::process::exit(1);
        }
    };

    let tokens = match zoom.acquire_access_token(&config).await {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("Token exchange failed: {e:?}");
            std::process::exit(1);
        }
    };

    info!("Token OK, listing account users...");

    let roster = match zoom.list_users(&tokens.access_token).await {
        Ok(roster) => roster,
        Err(e) => {
            error!("Failed to list users: {e:?}");
            std::process::exit(1);
        }
    };

    if roster.users.is_empty() {
        info!("No users found in the account");
        return;
    }

    info!("Users found (email, name, type, id):");
    for user in roster.users {
        info!(
            "- {}  |  {} {}  |  type:{}  |  id:{}",
            user.email,
            user.first_name.unwrap_or_default(),
            user.last_name.unwrap_or_default(),
            user.user_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "?".to_string()),
            user.id
        );
    }
}
