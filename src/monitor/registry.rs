//! Tracked-file registry.

use std::collections::HashMap;
use std::path::PathBuf;

use super::error::MonitorError;
use super::events::{EventSender, TailEvent};
use super::record::FileRecord;

/// The table of currently tracked files, one per prefix, bounded by the
/// configured maximum file count.
#[derive(Debug)]
pub struct Registry {
    records: HashMap<String, FileRecord>,
    max_files: usize,
}

impl Registry {
    /// Create an empty registry with the given capacity bound.
    #[must_use]
    pub fn new(max_files: usize) -> Self {
        Self {
            records: HashMap::new(),
            max_files,
        }
    }

    /// Number of tracked prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the record tracked for a prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&FileRecord> {
        self.records.get(prefix)
    }

    /// Iterate mutably over all tracked records.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut FileRecord> {
        self.records.values_mut()
    }

    /// Populate the registry from the initial scan.
    ///
    /// Starting over the limit is a configuration problem, not a transient
    /// one, so it aborts startup instead of silently dropping files.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::TooManyFiles`] listing every matched prefix
    /// when the scan exceeds the capacity bound.
    pub fn seed(
        &mut self,
        scanned: HashMap<String, FileRecord>,
        events: &EventSender,
    ) -> Result<(), MonitorError> {
        if scanned.len() > self.max_files {
            let mut prefixes: Vec<(String, PathBuf)> = scanned
                .into_iter()
                .map(|(prefix, record)| (prefix, record.path().to_path_buf()))
                .collect();
            prefixes.sort();
            return Err(MonitorError::TooManyFiles {
                limit: self.max_files,
                prefixes,
            });
        }

        for (prefix, mut record) in scanned {
            record.start_watching(events);
            self.records.insert(prefix, record);
        }
        Ok(())
    }

    /// Reconcile the registry against a fresh scan result.
    ///
    /// Prefixes that disappeared are stopped and evicted; new prefixes are
    /// started while capacity allows; a prefix whose candidate has a
    /// different path is rotated (old stopped, new started). A path-identical
    /// candidate changes nothing: metadata refresh happens in the tail
    /// cycle, not here.
    pub fn reconcile(&mut self, scanned: HashMap<String, FileRecord>, events: &EventSender) {
        let removed: Vec<String> = self
            .records
            .keys()
            .filter(|prefix| !scanned.contains_key(*prefix))
            .cloned()
            .collect();
        for prefix in removed {
            if let Some(record) = self.records.remove(&prefix) {
                record.stop_watching(events);
            }
        }

        for (prefix, mut candidate) in scanned {
            if let Some(current) = self.records.get(&prefix) {
                if current.path() != candidate.path() {
                    current.stop_watching(events);
                    candidate.start_watching(events);
                    self.records.insert(prefix, candidate);
                }
            } else if self.records.len() < self.max_files {
                candidate.start_watching(events);
                self.records.insert(prefix, candidate);
            } else {
                let _ = events.send(TailEvent::LimitReached {
                    limit: self.max_files,
                    path: candidate.path().to_path_buf(),
                });
            }
        }
    }
}
