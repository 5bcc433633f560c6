//! Depth Forwarder Runtime
//!
//! Reads scheduled depth events from a newline-delimited JSON file and
//! processes them sequentially: query the WITS window, deduplicate
//! against the depth cursor, forward one summary record per window.
//!
//! Usage:
//!   cargo run --release --bin depth_forwarder
//!
//! Environment variables:
//!   DATA_API_URL       - Data API base URL (default: https://data.corva.ai)
//!   DATA_API_KEY       - Optional API key for the Authorization header
//!   WITS_COLLECTION    - Dataset queried for WITS records (default: wits)
//!   OUTPUT_COLLECTION  - Output collection (default: wits-depth-summary)
//!   PROVIDER           - Provider namespace (default: corva)
//!   CURSOR_DB_PATH     - SQLite cursor database (default: depthflow.db)
//!   EVENTS_PATH        - Event file (default: events.jsonl)

use depthflow::config::Settings;
use depthflow::forwarder::{load_events, process_depth_event, CorvaDataApi, SqliteCursorStore};
use dotenv::dotenv;
use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize environment and logging
    dotenv().ok();
    env_logger::init();

    // NOTE: Workaround for rustls issue
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Can't set crypto provider to aws_lc_rs");

    let settings = Settings::from_env();

    info!("🚀 Starting depth forwarder");
    info!("   ├─ API: {}", settings.api_url);
    info!("   ├─ Dataset: {}/{}", settings.provider, settings.wits_collection);
    info!("   ├─ Output: {}/{}", settings.provider, settings.output_collection);
    info!("   ├─ Cursor DB: {}", settings.cursor_db_path);
    info!("   └─ Events: {}", settings.events_path);

    let cursors = SqliteCursorStore::open(&settings.cursor_db_path)?;
    let api = CorvaDataApi::new(&settings)?;

    let events = load_events(&settings.events_path)?;
    if events.is_empty() {
        info!("no scheduled events to process");
        return Ok(());
    }

    for event in &events {
        match process_depth_event(event, &api, &cursors, &settings).await {
            Ok(Some(output)) => {
                info!(
                    "✅ Forwarded depth {} for asset {}",
                    output.measured_depth, output.asset_id
                );
            }
            Ok(None) => {
                info!(
                    "⏭  Window [{}, {}] already processed for asset {}",
                    event.top_depth, event.bottom_depth, event.asset_id
                );
            }
            Err(e) => {
                // No local retry: surface the failure so the invoking
                // scheduler re-runs the batch from the cursor.
                error!("❌ Invocation failed for asset {}: {}", event.asset_id, e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
