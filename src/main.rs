pub mod config;
pub mod forwarder;

pub use config::Settings;
pub use forwarder::{
    process_depth_event, CorvaDataApi, CursorStore, DatasetApi, DatasetQuery, ForwarderError,
    MemoryCursorStore, OutputRecord, ScheduledDepthEvent, SqliteCursorStore, WitsRecord,
};
