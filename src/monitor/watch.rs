//! Directory change watch.
//!
//! Bridges filesystem notifications to the coordinator's signal bits. The
//! polling loop still stats every tracked file each cycle; this watch only
//! tells it when the set of files may have changed.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify_debouncer_full::{
    new_debouncer,
    notify::{self, event::ModifyKind, EventKind, RecursiveMode},
    DebounceEventResult, Debouncer, RecommendedCache,
};

use super::signals::{Signals, DIRECTORY_MODIFIED};

/// Coalescing window for raw filesystem events.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// Watches the target directory and raises the directory-modified bit
/// whenever an entry is created, removed, or renamed.
///
/// Dropping the watch releases the underlying platform watcher.
pub struct DirectoryWatch {
    _debouncer: Debouncer<notify::RecommendedWatcher, RecommendedCache>,
}

impl DirectoryWatch {
    /// Start watching `directory`, raising bits on `signals`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform watcher cannot be established.
    pub fn new(directory: &Path, signals: Arc<Signals>) -> Result<Self, notify::Error> {
        let mut debouncer = new_debouncer(
            DEBOUNCE_WINDOW,
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    if events
                        .iter()
                        .any(|event| is_membership_change(&event.kind))
                    {
                        signals.raise(DIRECTORY_MODIFIED);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        tracing::warn!(error = %error, "Directory watch error");
                    }
                    // a degraded watch forces a rescan rather than risking a
                    // missed new file
                    signals.raise(DIRECTORY_MODIFIED);
                }
            },
        )?;

        debouncer.watch(directory, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

/// Whether an event kind can change which files exist in the directory.
/// Plain content writes are handled by the polling stat, not by rescans.
fn is_membership_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    )
}
