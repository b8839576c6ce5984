//! One tail cycle over the registry.

use regex::Regex;

use super::events::{EventSender, TailEvent};
use super::line_reader::read_appended;
use super::record::FileRecord;
use super::registry::Registry;

/// Check every tracked file for growth or shrinkage and emit new content.
///
/// Records are processed independently: a failure on one file never
/// prevents the rest of the cycle. Failed records stay in the registry;
/// membership only changes during reconciliation.
pub async fn run_tail_cycle(
    registry: &mut Registry,
    alert_pattern: Option<&Regex>,
    events: &EventSender,
) {
    for record in registry.records_mut() {
        tail_record(record, alert_pattern, events).await;
    }
}

/// Tail a single record.
///
/// The stat uses a fresh handle every cycle: on some platforms a writer's
/// buffer is only flushed to the backing store when a new handle opens the
/// file, which is why polling is needed at all.
async fn tail_record(
    record: &mut FileRecord,
    alert_pattern: Option<&Regex>,
    events: &EventSender,
) {
    let metadata = match tokio::fs::metadata(record.path()).await {
        Ok(metadata) => metadata,
        Err(error) => {
            let _ = events.send(TailEvent::StatFailed {
                prefix: record.prefix().to_string(),
                path: record.path().to_path_buf(),
                error: error.to_string(),
            });
            return;
        }
    };

    let size = metadata.len();
    let modified = metadata.modified().unwrap_or_else(|_| record.modified());
    if size == record.size() && modified == record.modified() {
        return;
    }

    if size < record.size() {
        // truncated or replaced in place: skip to the new end without
        // emitting anything this cycle
        tracing::debug!(
            prefix = record.prefix(),
            old_size = record.size(),
            new_size = size,
            "File shrank, resuming from new end"
        );
        record.set_last_tailed(size);
    } else if size > record.size() {
        match read_appended(record.path(), record.last_tailed(), size).await {
            Ok(batch) => {
                for line in batch.lines {
                    let matched = alert_pattern.is_some_and(|pattern| pattern.is_match(&line));
                    let _ = events.send(TailEvent::Line {
                        prefix: record.prefix().to_string(),
                        line,
                    });
                    if matched {
                        let _ = events.send(TailEvent::Alert);
                    }
                }
                record.set_last_tailed(batch.end_offset);
            }
            Err(error) => {
                let _ = events.send(TailEvent::ReadFailed {
                    prefix: record.prefix().to_string(),
                    path: record.path().to_path_buf(),
                    error: error.to_string(),
                });
                // baseline untouched: the same range is retried next cycle
                return;
            }
        }
    }

    record.observe(size, modified);
}
