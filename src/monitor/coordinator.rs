//! Polling-loop coordinator.
//!
//! Owns the whole monitoring lifecycle: initial scan, directory watch,
//! reconciliation on change signals, one tail cycle per poll, and a
//! cooperative shutdown observed at the top of each iteration.

use std::sync::Arc;

use crate::config::MonitorConfig;

use super::cycle::run_tail_cycle;
use super::error::MonitorError;
use super::events::{EventSender, TailEvent};
use super::registry::Registry;
use super::scanner::scan;
use super::signals::{Signals, DIRECTORY_MODIFIED, STOP_REQUESTED};
use super::watch::DirectoryWatch;

/// Drives the scan / reconcile / tail loop until a stop is requested.
pub struct Coordinator {
    config: MonitorConfig,
    signals: Arc<Signals>,
    events: EventSender,
}

impl Coordinator {
    /// Create a coordinator over a validated configuration.
    #[must_use]
    pub fn new(config: MonitorConfig, signals: Arc<Signals>, events: EventSender) -> Self {
        Self {
            config,
            signals,
            events,
        }
    }

    /// Run until shutdown is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory watch cannot be established, the
    /// initial scan fails, or the initial scan matches more prefixes than
    /// the configured limit. Errors after startup are reported through the
    /// event stream and retried on the next cycle instead.
    pub async fn run(self) -> Result<(), MonitorError> {
        // establish the watch before the first scan so a file created in
        // between still raises the modified bit
        let _watch = DirectoryWatch::new(&self.config.directory, Arc::clone(&self.signals))
            .map_err(|source| MonitorError::Watch {
                path: self.config.directory.clone(),
                source,
            })?;

        let scanned =
            scan(&self.config.directory, &self.config.file_pattern).map_err(|source| {
                MonitorError::Scan {
                    path: self.config.directory.clone(),
                    source,
                }
            })?;

        if scanned.is_empty() {
            let _ = self.events.send(TailEvent::NoMatches);
        }

        let mut registry = Registry::new(self.config.max_files);
        registry.seed(scanned, &self.events)?;
        tracing::info!(
            files = registry.len(),
            directory = %self.config.directory.display(),
            "Monitoring started"
        );

        let mut idle_cycles: u32 = 0;
        loop {
            let taken = self.signals.take();
            if taken & STOP_REQUESTED != 0 {
                break;
            }

            let hedge_due = self.config.rescan_after_cycles > 0
                && idle_cycles >= self.config.rescan_after_cycles;
            if taken & DIRECTORY_MODIFIED != 0 || hedge_due {
                idle_cycles = 0;
                match scan(&self.config.directory, &self.config.file_pattern) {
                    Ok(scanned) => registry.reconcile(scanned, &self.events),
                    Err(error) => {
                        let _ = self.events.send(TailEvent::ScanFailed {
                            error: error.to_string(),
                        });
                    }
                }
            } else {
                idle_cycles += 1;
            }

            run_tail_cycle(
                &mut registry,
                self.config.alert_pattern.as_ref(),
                &self.events,
            )
            .await;

            // a stop raised mid-cycle skips the sleep
            if self.signals.stop_requested() {
                break;
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }

        tracing::info!("Monitoring stopped");
        Ok(())
        // _watch drops here, releasing the directory watch
    }
}
