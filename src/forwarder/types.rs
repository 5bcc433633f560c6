//! Core types for the scheduled-depth forwarder
//!
//! All structures match the data API's wire shapes:
//! - `ScheduledDepthEvent` - one depth window per invocation
//! - `WitsRecord` - provider document returned by a dataset query
//! - `OutputRecord` - the summary document posted to the output collection

use serde::{Deserialize, Serialize};

/// Depth-range event delivered by the scheduling platform.
///
/// Bounds are inclusive on both ends. `bottom_depth >= top_depth` is
/// assumed, not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledDepthEvent {
    pub asset_id: i64,
    pub log_identifier: String,
    pub top_depth: f64,
    pub bottom_depth: f64,
}

impl ScheduledDepthEvent {
    /// Cursor key for this event: one checkpoint per asset/log pair.
    pub fn cursor_scope(&self) -> String {
        format!("{}:{}", self.asset_id, self.log_identifier)
    }
}

/// WITS record returned by a dataset query, ordered ascending by
/// `measured_depth` within a result.
///
/// `company_id` and `data.dep` may be absent in a provider document;
/// both carry through as null rather than failing the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitsRecord {
    #[serde(default)]
    pub company_id: Option<i64>,
    pub measured_depth: f64,
    #[serde(default)]
    pub data: WitsData,
}

/// Nested sensor payload of a WITS record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WitsData {
    #[serde(default)]
    pub dep: Option<f64>,
}

/// Summary record forwarded to the output collection.
///
/// Built fresh per forwarded window, written once, never mutated. The
/// natural key (`asset_id`, `log_identifier`, `measured_depth`) is stable
/// across retries so the consumer can deduplicate replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub measured_depth: f64,
    pub asset_id: i64,
    pub company_id: Option<i64>,
    pub log_identifier: String,
    pub provider: String,
    pub collection: String,
    pub data: OutputData,
    pub version: i64,
}

/// Sensor payload carried through to the output record unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputData {
    pub dep: Option<f64>,
}
