//! Runtime configuration from environment variables

use std::env;

/// Configuration for the depth forwarder
///
/// Loaded from environment variables with sensible defaults. The fields
/// stamped into every output record (provider, output collection,
/// version) live here so one deployment writes one collection.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the data API
    pub api_url: String,

    /// Optional API key sent as the Authorization header
    pub api_key: Option<String>,

    /// Dataset queried for WITS records
    pub wits_collection: String,

    /// Collection the summary records are posted to
    pub output_collection: String,

    /// Data provider namespace for both reads and writes
    pub provider: String,

    /// Version stamped on every output record
    pub version: i64,

    /// Path to the SQLite cursor database
    pub cursor_db_path: String,

    /// Path to the newline-delimited JSON event file
    pub events_path: String,

    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,
}

impl Settings {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `DATA_API_URL` (default: https://data.corva.ai)
    /// - `DATA_API_KEY` (optional, sent as `Authorization: API <key>`)
    /// - `WITS_COLLECTION` (default: wits)
    /// - `OUTPUT_COLLECTION` (default: wits-depth-summary)
    /// - `PROVIDER` (default: corva)
    /// - `APP_VERSION` (default: 1)
    /// - `CURSOR_DB_PATH` (default: depthflow.db)
    /// - `EVENTS_PATH` (default: events.jsonl)
    /// - `HTTP_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("DATA_API_URL")
                .unwrap_or_else(|_| "https://data.corva.ai".to_string()),

            api_key: env::var("DATA_API_KEY").ok(),

            wits_collection: env::var("WITS_COLLECTION")
                .unwrap_or_else(|_| "wits".to_string()),

            output_collection: env::var("OUTPUT_COLLECTION")
                .unwrap_or_else(|_| "wits-depth-summary".to_string()),

            provider: env::var("PROVIDER").unwrap_or_else(|_| "corva".to_string()),

            version: env::var("APP_VERSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),

            cursor_db_path: env::var("CURSOR_DB_PATH")
                .unwrap_or_else(|_| "depthflow.db".to_string()),

            events_path: env::var("EVENTS_PATH")
                .unwrap_or_else(|_| "events.jsonl".to_string()),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Test: Default configuration when no env vars set
        env::remove_var("WITS_COLLECTION");
        env::remove_var("OUTPUT_COLLECTION");
        env::remove_var("PROVIDER");

        let settings = Settings::from_env();

        assert_eq!(settings.wits_collection, "wits");
        assert_eq!(settings.output_collection, "wits-depth-summary");
        assert_eq!(settings.provider, "corva");
    }

    #[test]
    fn test_custom_config() {
        // Test: Custom configuration from env vars (vars disjoint from
        // test_default_config so parallel runs don't race)
        env::set_var("CURSOR_DB_PATH", "/tmp/test-cursors.db");
        env::set_var("HTTP_TIMEOUT_SECS", "30");
        env::set_var("APP_VERSION", "4");

        let settings = Settings::from_env();

        assert_eq!(settings.cursor_db_path, "/tmp/test-cursors.db");
        assert_eq!(settings.http_timeout_secs, 30);
        assert_eq!(settings.version, 4);

        // Cleanup
        env::remove_var("CURSOR_DB_PATH");
        env::remove_var("HTTP_TIMEOUT_SECS");
        env::remove_var("APP_VERSION");
    }
}
