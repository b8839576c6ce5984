//! Coordinator signal bits.
//!
//! The directory watch and the shutdown hook communicate with the polling
//! loop through this two-bit atomic set and nothing else.

use std::sync::atomic::{AtomicU32, Ordering};

/// The watched directory gained, lost, or renamed an entry.
pub const DIRECTORY_MODIFIED: u32 = 1 << 0;

/// Shutdown was requested. Set once, never cleared.
pub const STOP_REQUESTED: u32 = 1 << 1;

/// Shared signal bits between the notifier paths and the polling loop.
///
/// Reading and clearing is a single atomic step so a signal raised between
/// two loop iterations is never lost and never double-consumed.
#[derive(Debug, Default)]
pub struct Signals(AtomicU32);

impl Signals {
    /// Create an empty signal set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the given signal bits.
    pub fn raise(&self, bits: u32) {
        self.0.fetch_or(bits, Ordering::SeqCst);
    }

    /// Request shutdown. The stop bit stays set for the process lifetime.
    pub fn request_stop(&self) {
        self.raise(STOP_REQUESTED);
    }

    /// Atomically read the current signal set and clear the directory bit.
    ///
    /// The stop bit is sticky: it is returned but never cleared, so a stop
    /// request can be observed again at any later check.
    pub fn take(&self) -> u32 {
        self.0.fetch_and(!DIRECTORY_MODIFIED, Ordering::SeqCst)
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst) & STOP_REQUESTED != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_directory_bit() {
        let signals = Signals::new();
        signals.raise(DIRECTORY_MODIFIED);
        assert_eq!(signals.take() & DIRECTORY_MODIFIED, DIRECTORY_MODIFIED);
        assert_eq!(signals.take() & DIRECTORY_MODIFIED, 0);
    }

    #[test]
    fn test_stop_bit_is_sticky() {
        let signals = Signals::new();
        signals.request_stop();
        assert_eq!(signals.take() & STOP_REQUESTED, STOP_REQUESTED);
        // still visible after a take
        assert!(signals.stop_requested());
        assert_eq!(signals.take() & STOP_REQUESTED, STOP_REQUESTED);
    }

    #[test]
    fn test_signal_raised_after_take_is_seen_next_take() {
        let signals = Signals::new();
        assert_eq!(signals.take(), 0);
        signals.raise(DIRECTORY_MODIFIED);
        assert_eq!(signals.take() & DIRECTORY_MODIFIED, DIRECTORY_MODIFIED);
    }

    #[test]
    fn test_both_bits_reported_together() {
        let signals = Signals::new();
        signals.raise(DIRECTORY_MODIFIED);
        signals.request_stop();
        let taken = signals.take();
        assert_eq!(taken, DIRECTORY_MODIFIED | STOP_REQUESTED);
    }
}
