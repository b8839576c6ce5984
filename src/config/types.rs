//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default regex matching rotating log file names. The first capture group
/// is the prefix that groups rotations of the same logical stream.
pub const DEFAULT_FILE_PATTERN: &str = r"(.+)_\d+\.log";

/// Default regex tested against emitted lines to raise the alert signal,
/// matching `Namespace.SomethingError:` / `Namespace.SomethingException:`.
pub const DEFAULT_ALERT_PATTERN: &str = r"[A-Za-z]+\.[A-Za-z]+(?:Exception|Error):";

/// Raw monitoring options as read from a config file or CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorOptions {
    /// Regex matching file names; the first capture group is the prefix.
    pub pattern: String,
    /// Regex that raises the alert signal when an emitted line matches.
    pub alert_pattern: String,
    /// Whether matching lines raise the alert signal.
    pub alert: bool,
    /// Maximum number of files tracked at once.
    pub max_files: usize,
    /// Polling interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Rescan unconditionally after this many cycles without a
    /// directory-change signal. 0 disables the hedge.
    pub rescan_after_cycles: u32,
}

fn default_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

fn default_alert_pattern() -> String {
    DEFAULT_ALERT_PATTERN.to_string()
}

fn default_max_files() -> usize {
    10
}

fn default_poll_interval_ms() -> u64 {
    750
}

fn default_rescan_after_cycles() -> u32 {
    40
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            alert_pattern: default_alert_pattern(),
            alert: true,
            max_files: default_max_files(),
            poll_interval_ms: default_poll_interval_ms(),
            rescan_after_cycles: default_rescan_after_cycles(),
        }
    }
}

/// Validated, compiled monitoring configuration handed to the coordinator.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Directory whose entries are scanned and tailed.
    pub directory: PathBuf,
    /// Compiled filename pattern; capture group 1 yields the prefix.
    pub file_pattern: Regex,
    /// Compiled alert pattern, `None` when alerting is disabled.
    pub alert_pattern: Option<Regex>,
    /// Maximum number of files tracked at once.
    pub max_files: usize,
    /// Fixed sleep between tail cycles.
    pub poll_interval: Duration,
    /// Rescan unconditionally after this many idle cycles (0 = disabled).
    pub rescan_after_cycles: u32,
}

impl MonitorConfig {
    /// Validate and compile raw options against a target directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not a directory, a regex fails to
    /// compile, or the filename pattern has no capture group.
    pub fn from_options(
        directory: PathBuf,
        options: &MonitorOptions,
    ) -> Result<Self, ConfigError> {
        if !directory.is_dir() {
            return Err(ConfigError::NotADirectory(directory));
        }

        let file_pattern =
            Regex::new(&options.pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: options.pattern.clone(),
                source,
            })?;

        // captures_len counts the implicit whole-match group 0
        if file_pattern.captures_len() < 2 {
            return Err(ConfigError::MissingCaptureGroup(options.pattern.clone()));
        }

        let alert_pattern = if options.alert {
            Some(
                Regex::new(&options.alert_pattern).map_err(|source| {
                    ConfigError::InvalidPattern {
                        pattern: options.alert_pattern.clone(),
                        source,
                    }
                })?,
            )
        } else {
            None
        };

        Ok(Self {
            directory,
            file_pattern,
            alert_pattern,
            max_files: options.max_files,
            poll_interval: Duration::from_millis(options.poll_interval_ms),
            rescan_after_cycles: options.rescan_after_cycles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_monitor_options_defaults() {
        let options = MonitorOptions::default();
        assert_eq!(options.pattern, DEFAULT_FILE_PATTERN);
        assert_eq!(options.alert_pattern, DEFAULT_ALERT_PATTERN);
        assert!(options.alert);
        assert_eq!(options.max_files, 10);
        assert_eq!(options.poll_interval_ms, 750);
        assert_eq!(options.rescan_after_cycles, 40);
    }

    #[test]
    fn test_monitor_options_deserialize_partial() {
        let toml_str = r#"
            pattern = "(server.*)\\.log"
            max_files = 4
        "#;
        let options: MonitorOptions = toml::from_str(toml_str).unwrap();
        assert_eq!(options.pattern, "(server.*)\\.log");
        assert_eq!(options.max_files, 4);
        // untouched fields keep their defaults
        assert_eq!(options.poll_interval_ms, 750);
        assert!(options.alert);
    }

    #[test]
    fn test_default_file_pattern_captures_prefix() {
        let re = Regex::new(DEFAULT_FILE_PATTERN).unwrap();
        let caps = re.captures("worker_20260823.log").unwrap();
        assert_eq!(&caps[1], "worker");
    }

    #[test]
    fn test_default_alert_pattern_matches_errors() {
        let re = Regex::new(DEFAULT_ALERT_PATTERN).unwrap();
        assert!(re.is_match("com.acme.FooError: boom"));
        assert!(re.is_match("System.NullReferenceException: oops"));
        assert!(!re.is_match("all good here"));
    }

    #[test]
    fn test_from_options_valid() {
        let dir = TempDir::new().unwrap();
        let config =
            MonitorConfig::from_options(dir.path().to_path_buf(), &MonitorOptions::default())
                .unwrap();
        assert_eq!(config.max_files, 10);
        assert!(config.alert_pattern.is_some());
        assert_eq!(config.poll_interval, Duration::from_millis(750));
    }

    #[test]
    fn test_from_options_not_a_directory() {
        let result = MonitorConfig::from_options(
            PathBuf::from("/nonexistent/dir-83291"),
            &MonitorOptions::default(),
        );
        assert!(matches!(result, Err(ConfigError::NotADirectory(_))));
    }

    #[test]
    fn test_from_options_missing_capture_group() {
        let dir = TempDir::new().unwrap();
        let options = MonitorOptions {
            pattern: r"\w+\.log".to_string(),
            ..MonitorOptions::default()
        };
        let result = MonitorConfig::from_options(dir.path().to_path_buf(), &options);
        assert!(matches!(result, Err(ConfigError::MissingCaptureGroup(_))));
    }

    #[test]
    fn test_from_options_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let options = MonitorOptions {
            pattern: "(".to_string(),
            ..MonitorOptions::default()
        };
        let result = MonitorConfig::from_options(dir.path().to_path_buf(), &options);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_from_options_alert_disabled_skips_compilation() {
        let dir = TempDir::new().unwrap();
        let options = MonitorOptions {
            alert: false,
            alert_pattern: "(".to_string(),
            ..MonitorOptions::default()
        };
        let config = MonitorConfig::from_options(dir.path().to_path_buf(), &options).unwrap();
        assert!(config.alert_pattern.is_none());
    }
}
