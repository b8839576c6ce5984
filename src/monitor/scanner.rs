//! Directory scanning and prefix grouping.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use super::record::FileRecord;

/// Scan `directory` and return, for each prefix captured by `pattern`, the
/// most recently created matching file.
///
/// Subdirectories, entries that vanish mid-scan, names that do not match,
/// and matches with an empty capture are all skipped. Creation-time ties
/// are broken by enumeration order (the earlier entry wins).
///
/// # Errors
///
/// Returns an error if the directory itself cannot be listed. Failures on
/// individual entries are tolerated.
pub fn scan(directory: &Path, pattern: &Regex) -> std::io::Result<HashMap<String, FileRecord>> {
    let mut newest: HashMap<String, FileRecord> = HashMap::new();

    for entry in std::fs::read_dir(directory)? {
        let Ok(entry) = entry else { continue };
        // the entry may vanish between listing and stat
        let Ok(metadata) = entry.metadata() else { continue };
        if metadata.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(caps) = pattern.captures(name) else {
            continue;
        };
        let Some(prefix) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if prefix.is_empty() {
            continue;
        }

        let record = FileRecord::from_metadata(prefix.to_string(), entry.path(), &metadata);
        match newest.entry(prefix.to_string()) {
            Entry::Occupied(mut slot) => {
                if record.created() > slot.get().created() {
                    slot.insert(record);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }

    Ok(newest)
}
