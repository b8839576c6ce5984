//! Per-tracked-file state.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::events::{EventSender, TailEvent};

/// Files smaller than this at `start_watching` time are candidates for a
/// rewind to offset 0.
pub const REWIND_MAX_SIZE: u64 = 1000;

/// Files created within this window of "now" are considered new enough to
/// rewind, so the initial burst written before first observation is not lost.
pub const REWIND_MAX_AGE: Duration = Duration::from_secs(6);

/// State for one tracked file: its prefix, path, timestamps, size, and the
/// offset up to which its content has been emitted.
#[derive(Debug, Clone)]
pub struct FileRecord {
    prefix: String,
    path: PathBuf,
    created: SystemTime,
    modified: SystemTime,
    size: u64,
    last_tailed: u64,
}

impl FileRecord {
    /// Create a record from known attributes. Tailing starts at the current
    /// end of the file unless `start_watching` rewinds it.
    #[must_use]
    pub fn new(
        prefix: String,
        path: PathBuf,
        created: SystemTime,
        modified: SystemTime,
        size: u64,
    ) -> Self {
        Self {
            prefix,
            path,
            created,
            modified,
            size,
            last_tailed: size,
        }
    }

    /// Create a record from a stat result.
    ///
    /// Falls back to the modification time where the filesystem does not
    /// report a creation time.
    #[must_use]
    pub fn from_metadata(prefix: String, path: PathBuf, metadata: &Metadata) -> Self {
        let modified = metadata
            .modified()
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);
        Self::new(prefix, path, created, modified, metadata.len())
    }

    /// The prefix grouping rotations of this logical stream.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The path of the file backing this record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creation time captured when the record was built.
    #[must_use]
    pub fn created(&self) -> SystemTime {
        self.created
    }

    /// Modification time as of the last observation.
    #[must_use]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Size as of the last observation.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Offset of the first byte not yet emitted.
    #[must_use]
    pub fn last_tailed(&self) -> u64 {
        self.last_tailed
    }

    /// Move the tail offset.
    pub fn set_last_tailed(&mut self, offset: u64) {
        self.last_tailed = offset;
    }

    /// Store a freshly observed size and modification time so the next
    /// cycle's delta detection is correct.
    pub fn observe(&mut self, size: u64, modified: SystemTime) {
        self.size = size;
        self.modified = modified;
    }

    /// Mark this record as tracked.
    ///
    /// A small file created moments ago probably accumulated its first bytes
    /// between creation and our first observation; rewind to the start so
    /// that initial burst is emitted rather than skipped. The size baseline
    /// is reset with the offset so the next cycle sees the existing content
    /// as growth and emits it without waiting for another write.
    pub fn start_watching(&mut self, events: &EventSender) {
        let rewound = self.size > 0
            && self.size < REWIND_MAX_SIZE
            && self
                .created
                .elapsed()
                .is_ok_and(|age| age < REWIND_MAX_AGE);
        if rewound {
            self.last_tailed = 0;
            self.size = 0;
        }
        let _ = events.send(TailEvent::Watching {
            prefix: self.prefix.clone(),
            path: self.path.clone(),
            rewound,
        });
    }

    /// Mark this record as no longer tracked.
    pub fn stop_watching(&self, events: &EventSender) {
        let _ = events.send(TailEvent::Stopped {
            prefix: self.prefix.clone(),
            path: self.path.clone(),
        });
    }
}
