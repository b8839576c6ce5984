//! Directory monitoring and multiplexed tail engine.
//!
//! Discovers the newest file per prefix, reconciles the tracked set when
//! the directory changes, and streams appended lines as [`TailEvent`]s.

mod coordinator;
mod cycle;
mod error;
mod events;
mod line_reader;
mod record;
mod registry;
mod scanner;
mod signals;
mod watch;

pub use coordinator::Coordinator;
pub use cycle::run_tail_cycle;
pub use error::MonitorError;
pub use events::{channel, EventReceiver, EventSender, TailEvent};
pub use line_reader::{read_appended, LineBatch, MAX_LINE_BYTES};
pub use record::{FileRecord, REWIND_MAX_AGE, REWIND_MAX_SIZE};
pub use registry::Registry;
pub use scanner::scan;
pub use signals::{Signals, DIRECTORY_MODIFIED, STOP_REQUESTED};
pub use watch::DirectoryWatch;
