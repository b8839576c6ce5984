//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The monitored target is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A regex failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// The filename pattern has no capture group to extract the prefix.
    #[error("Pattern '{0}' must contain at least one capture group for the prefix")]
    MissingCaptureGroup(String),

    /// A config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A config file exists but could not be parsed.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_directory_display() {
        let err = ConfigError::NotADirectory(PathBuf::from("/tmp/nope"));
        assert_eq!(err.to_string(), "Not a directory: /tmp/nope");
    }

    #[test]
    fn test_missing_capture_group_display() {
        let err = ConfigError::MissingCaptureGroup(r"\w+\.log".to_string());
        assert!(err.to_string().contains("capture group"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid pattern '('"));
    }
}
