//! Operational check: insert a test row into the meetings table and read
//! back the most recent rows to confirm store connectivity.

use chrono::Utc;
use domain::gateway::supabase::SupabaseClient;
use domain::gateway::zoom::MeetingStatus;
use domain::meeting::NewMeetingRecord;
use log::{error, info};
use serde_json::json;
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let store = match SupabaseClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build store client: {e:?}");
            std::process::exit(1);
        }
    };

    let record = NewMeetingRecord {
        zoom_id: "test-123".to_string(),
        room_id: None,
        topic: "test insert".to_string(),
        agenda: None,
        start_time: Some(Utc::now()),
        duration: 10,
        timezone: "UTC".to_string(),
        join_url: None,
        start_url: None,
        passcode: None,
        status: MeetingStatus::Test,
        recording_url: None,
        host_id: None,
        created_by: None,
        settings: json!({}),
        participants: vec![],
    };

    match store.insert_meeting(&record).await {
        Ok(row) => info!("INSERT OK, returned row id: {:?}", row.id),
        Err(e) => {
            error!("INSERT ERROR: {e:?}");
            std::process::exit(1);
        }
    }

    match store.recent_meetings(5).await {
        Ok(rows) => {
            info!("Latest rows in zoom_meetings:");
            for row in rows {
                info!(
                    "- {}  |  {}  |  {:?}  |  created {:?}",
                    row.zoom_id, row.topic, row.status, row.created_at
                );
            }
        }
        Err(e) => {
            error!("SELECT ERROR: {e:?}");
            std::process::exit(1);
        }
    }
}
