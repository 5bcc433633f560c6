//! Event source for the runtime binary.
//!
//! The scheduling platform hands the handler one event per invocation;
//! for local and batch runs the runtime reads newline-delimited JSON
//! events from a file instead.

use std::fs;
use std::path::Path;

use super::error::Result;
use super::types::ScheduledDepthEvent;

/// Load events from a newline-delimited JSON file.
///
/// A missing file yields no events rather than an error so a fresh
/// deployment starts idle. Blank lines are skipped; a malformed line
/// aborts the load.
pub fn load_events(file_path: &str) -> Result<Vec<ScheduledDepthEvent>> {
    if !Path::new(file_path).exists() {
        log::info!("no event file found: {}", file_path);
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(file_path)?;

    let mut events = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        events.push(serde_json::from_str(line)?);
    }

    log::info!("loaded {} events from {}", events.len(), file_path);
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forwarder::error::ForwarderError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_events_from_jsonl() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"asset_id":42,"log_identifier":"A","top_depth":1000.0,"bottom_depth":1010.0}}"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            r#"{{"asset_id":42,"log_identifier":"A","top_depth":1010.0,"bottom_depth":1020.0}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let events = load_events(file.path().to_str().unwrap()).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].top_depth, 1000.0);
        assert_eq!(events[1].bottom_depth, 1020.0);
    }

    #[test]
    fn test_missing_file_yields_no_events() {
        let events = load_events("does/not/exist.jsonl").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_malformed_line_aborts_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{not json").unwrap();
        file.flush().unwrap();

        let err = load_events(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ForwarderError::Decode(_)));
    }
}
