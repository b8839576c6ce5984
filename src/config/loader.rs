//! Configuration file loader.

use std::path::PathBuf;

use super::{ConfigError, MonitorOptions};

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: .logmux.toml
        search_paths.push(PathBuf::from(".logmux.toml"));

        // 2. User config directory: ~/.config/logmux/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("logmux").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load options from the first available file, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load(&self) -> Result<MonitorOptions, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Self::load_from_path(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(MonitorOptions::default())
    }

    /// Load options from a specific path.
    fn load_from_path(path: &PathBuf) -> Result<MonitorOptions, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })
    }

    /// Get the search paths for debugging.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the first config file that exists.
    #[must_use]
    pub fn find_config_file(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|p| p.exists()).cloned()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_loader_default_paths() {
        let loader = ConfigLoader::new();
        assert!(!loader.search_paths().is_empty());
        assert!(loader.search_paths()[0].ends_with(".logmux.toml"));
    }

    #[test]
    fn test_config_loader_returns_defaults_when_no_file() {
        let loader = ConfigLoader::with_path(PathBuf::from("/nonexistent/path.toml"));
        let options = loader.load().unwrap();
        assert_eq!(options.max_files, 10);
        assert!(options.alert);
    }

    #[test]
    fn test_config_loader_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pattern = \"(app.*)_\\\\d+\\\\.log\"").unwrap();
        writeln!(file, "alert = false").unwrap();
        writeln!(file, "poll_interval_ms = 250").unwrap();
        file.flush().unwrap();

        let loader = ConfigLoader::with_path(file.path().to_path_buf());
        let options = loader.load().unwrap();
        assert_eq!(options.pattern, "(app.*)_\\d+\\.log");
        assert!(!options.alert);
        assert_eq!(options.poll_interval_ms, 250);
        // unspecified fields keep their defaults
        assert_eq!(options.max_files, 10);
    }

    #[test]
    fn test_config_loader_reports_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_files = \"lots\"").unwrap();
        file.flush().unwrap();

        let loader = ConfigLoader::with_path(file.path().to_path_buf());
        let result = loader.load();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_find_config_file_none() {
        let loader = ConfigLoader::with_path(PathBuf::from("/nonexistent/path.toml"));
        assert!(loader.find_config_file().is_none());
    }
}
