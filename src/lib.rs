//! logmux - live multiplexed tailing of rotating, prefix-named log files.
//!
//! Watches a directory for the newest file belonging to each filename
//! prefix and streams appended lines to the console as they arrive.

pub mod config;
pub mod display;
pub mod monitor;
