//! # Scheduled-Depth Forwarder
//!
//! One invocation per depth-range event:
//!
//! 1. Query the WITS dataset for records inside the window (inclusive
//!    bounds, ascending by measured depth, capped at 500).
//! 2. Read the depth cursor for the event's asset/log scope; a window
//!    entirely at or below the cursor is skipped.
//! 3. Otherwise forward one summary record, checkpointed at the window
//!    bottom, to the output collection.
//! 4. Advance the cursor to the window bottom.
//!
//! The write and the cursor advance are not atomic: a crash between them
//! replays the window on the next invocation, and the replayed record is
//! identical (stable natural key) so the consumer can deduplicate.
//! Everything else - scheduling, API transport internals, retries - lives
//! outside this module.
//!
//! ## Module Organization
//!
//! - `types` - Event, record, and output structures
//! - `error` - Typed invocation errors
//! - `api` - Dataset read/write client
//! - `cursor` - Depth cursor persistence
//! - `handler` - The per-event forwarding contract
//! - `source` - Newline-delimited JSON event source

pub mod api;
pub mod cursor;
pub mod error;
pub mod handler;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use api::{CorvaDataApi, DatasetApi, DatasetQuery};
pub use cursor::{CursorStore, MemoryCursorStore, SqliteCursorStore};
pub use error::{ForwarderError, Result};
pub use handler::{process_depth_event, QUERY_LIMIT};
pub use source::load_events;
pub use types::{OutputData, OutputRecord, ScheduledDepthEvent, WitsData, WitsRecord};
