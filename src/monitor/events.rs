//! Tail event stream.
//!
//! The monitoring engine reports everything it observes through a single
//! channel of [`TailEvent`] values; the consumer decides how to render them.

use std::path::PathBuf;

use tokio::sync::mpsc;

/// Sending half of the tail event stream (the line-sink).
pub type EventSender = mpsc::UnboundedSender<TailEvent>;

/// Receiving half of the tail event stream.
pub type EventReceiver = mpsc::UnboundedReceiver<TailEvent>;

/// Events emitted by the monitoring engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TailEvent {
    /// A line appended to a tracked file, tagged with its prefix.
    Line { prefix: String, line: String },
    /// A line matched the alert pattern. One event per matching line.
    Alert,
    /// A file became tracked for its prefix.
    Watching {
        prefix: String,
        path: PathBuf,
        /// The tail offset was rewound to the start of the file.
        rewound: bool,
    },
    /// A file stopped being tracked.
    Stopped { prefix: String, path: PathBuf },
    /// A newly discovered file was not tracked because the registry is full.
    LimitReached { limit: usize, path: PathBuf },
    /// A tracked file could not be stat'ed this cycle.
    StatFailed {
        prefix: String,
        path: PathBuf,
        error: String,
    },
    /// A tracked file could not be read this cycle.
    ReadFailed {
        prefix: String,
        path: PathBuf,
        error: String,
    },
    /// A rescan of the directory failed; tracked files are unaffected.
    ScanFailed { error: String },
    /// No files matched the filename pattern at startup.
    NoMatches,
}

/// Create a new unbounded tail event channel.
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
