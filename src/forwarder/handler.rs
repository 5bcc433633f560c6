//! Scheduled-depth event handler.
//!
//! One invocation: query the WITS dataset for the event's depth window,
//! deduplicate against the per-scope depth cursor, forward one summary
//! record, advance the cursor. Strictly sequential; exactly two terminal
//! outcomes on the success path - skipped or forwarded.

use log::{debug, info};

use super::api::{DatasetApi, DatasetQuery};
use super::cursor::CursorStore;
use super::error::{ForwarderError, Result};
use super::types::{OutputData, OutputRecord, ScheduledDepthEvent};
use crate::config::Settings;

/// Result cap for a single window query.
pub const QUERY_LIMIT: usize = 500;

/// Process one scheduled depth event.
///
/// Returns `Ok(Some(record))` when the window was forwarded and
/// `Ok(None)` when the whole window falls at or below the stored cursor.
/// Errors abort the invocation without local recovery; the scheduling
/// platform retries by re-invoking.
pub async fn process_depth_event(
    event: &ScheduledDepthEvent,
    api: &dyn DatasetApi,
    cursors: &dyn CursorStore,
    settings: &Settings,
) -> Result<Option<OutputRecord>> {
    // Bounds are inclusive on both ends so adjacent windows partition the
    // log without dropping boundary records.
    let query = DatasetQuery {
        asset_id: event.asset_id,
        log_identifier: event.log_identifier.clone(),
        top_depth: event.top_depth,
        bottom_depth: event.bottom_depth,
        limit: QUERY_LIMIT,
    };

    let records = api
        .get_dataset(&settings.provider, &settings.wits_collection, &query)
        .await?;

    debug!("{:?}", records);
    let record_count = records.len();

    let first = records.first().ok_or_else(|| ForwarderError::EmptyResult {
        asset_id: event.asset_id,
        log_identifier: event.log_identifier.clone(),
        top_depth: event.top_depth,
        bottom_depth: event.bottom_depth,
    })?;

    // Representative values come from the shallowest record in the
    // window, not an aggregate over it.
    let company_id = first.company_id;
    let dep = first.data.dep;

    let scope = event.cursor_scope();
    let last_forwarded = read_cursor(cursors, &scope).await?;

    // Window-level dedup: the window is either entirely behind the
    // cursor or it is forwarded as one record.
    if event.bottom_depth <= last_forwarded as f64 {
        debug!(
            "already processed data until {} for scope {}",
            last_forwarded, scope
        );
        return Ok(None);
    }

    // The whole window collapses into one record checkpointed at the
    // window bottom.
    let output = OutputRecord {
        measured_depth: event.bottom_depth,
        asset_id: event.asset_id,
        company_id,
        log_identifier: event.log_identifier.clone(),
        provider: settings.provider.clone(),
        collection: settings.output_collection.clone(),
        data: OutputData { dep },
        version: settings.version,
    };

    debug!(
        "asset_id={} company_id={:?} top_depth={} bottom_depth={} record_count={}",
        event.asset_id, company_id, event.top_depth, event.bottom_depth, record_count
    );

    api.post_records(
        &settings.provider,
        &settings.output_collection,
        std::slice::from_ref(&output),
    )
    .await?;

    // Not atomic with the write above: a crash between the POST and this
    // advance re-forwards the window on the next invocation. The output
    // record's natural key is stable, so the consumer can deduplicate.
    cursors.advance(&scope, event.bottom_depth).await?;

    info!(
        "forwarded window [{}, {}] for asset {} ({} records)",
        event.top_depth, event.bottom_depth, event.asset_id, record_count
    );

    Ok(Some(output))
}

/// Read and parse the depth cursor for a scope.
///
/// Missing or empty is 0. A stored value parses as a float and truncates
/// to an integer; a present but non-numeric value is a typed error, never
/// an implicit fault.
async fn read_cursor(cursors: &dyn CursorStore, scope: &str) -> Result<i64> {
    match cursors.get(scope).await? {
        None => Ok(0),
        Some(raw) if raw.trim().is_empty() => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(|depth| depth as i64)
            .map_err(|_| ForwarderError::MalformedCursor {
                scope: scope.to_string(),
                value: raw,
            }),
    }
}
