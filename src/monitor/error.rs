//! Monitor error types.

use std::path::PathBuf;

/// Errors that can occur while monitoring a directory.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The directory-change watch could not be established.
    #[error("Unable to watch directory {path} for changes: {source}")]
    Watch {
        path: PathBuf,
        source: notify::Error,
    },

    /// The directory could not be listed.
    #[error("Failed to scan directory {path}: {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },

    /// More prefixes matched at startup than the configured limit allows.
    #[error("Too many files match the pattern: {} matched, limit is {limit}", prefixes.len())]
    TooManyFiles {
        limit: usize,
        prefixes: Vec<(String, PathBuf)>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_files_display() {
        let err = MonitorError::TooManyFiles {
            limit: 2,
            prefixes: vec![
                ("a".to_string(), PathBuf::from("a_1.log")),
                ("b".to_string(), PathBuf::from("b_1.log")),
                ("c".to_string(), PathBuf::from("c_1.log")),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Too many files match the pattern: 3 matched, limit is 2"
        );
    }

    #[test]
    fn test_scan_display() {
        let err = MonitorError::Scan {
            path: PathBuf::from("/var/log"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/var/log"));
    }
}
