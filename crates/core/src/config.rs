use crate::{
    error::{CoreError, Result},
    selector::MetricSelector,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Seconds between samples in normal operation
pub const DEFAULT_SLEEP_SECS: f64 = 1800.0;

/// Seconds between samples when persistence is turned off
pub const DEFAULT_NOLOG_SECS: f64 = 1.25;

pub const DEFAULT_OUTPUT_PATH: &str = "log.json";

/// Longest accepted interval, one year
pub const MAX_INTERVAL_SECS: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// 0 keeps every entry
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 0;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interval between samples in seconds
    pub sleep_secs: f64,

    /// Interval used instead of `sleep_secs` when logging is disabled
    pub nolog_secs: f64,

    /// Event log location; `None` disables persistence
    pub output_path: Option<PathBuf>,

    /// Cap on stored events, 0 for unbounded
    pub max_log_entries: usize,

    /// Metric toggles
    pub metrics: MetricSelector,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sleep_secs: DEFAULT_SLEEP_SECS,
            nolog_secs: DEFAULT_NOLOG_SECS,
            output_path: Some(PathBuf::from(DEFAULT_OUTPUT_PATH)),
            max_log_entries: DEFAULT_MAX_LOG_ENTRIES,
            metrics: MetricSelector::default(),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in order of preference:
    /// 1. CLI arguments override everything
    /// 2. JSON config file if specified
    /// 3. First default config file location that exists
    /// 4. Built-in defaults
    pub fn load(cli_config: Option<&CliConfig>, json_path: Option<&Path>) -> Result<Self> {
        let mut config = match json_path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default_config().unwrap_or_default(),
        };

        if let Some(cli) = cli_config {
            config = config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CoreError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            CoreError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Load configuration from default locations
    fn load_default_config() -> Option<Self> {
        for path in Self::default_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config file");
                    return Some(config);
                }
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        None
    }

    /// Get default configuration file search paths
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sysmonlog").join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".sysmonlog.json"));
        }

        // Current directory
        paths.push(PathBuf::from("sysmonlog.json"));

        paths
    }

    /// Apply CLI argument overrides. `no_log` wins over `output_path`.
    pub(crate) fn apply_cli_overrides(mut self, cli: &CliConfig) -> Self {
        if let Some(secs) = cli.interval_secs {
            self.sleep_secs = secs;
        }
        if let Some(path) = &cli.output_path {
            self.output_path = Some(path.clone());
        }
        if let Some(max) = cli.max_entries {
            self.max_log_entries = max;
        }
        if cli.no_log {
            self.output_path = None;
            self.sleep_secs = self.nolog_secs;
        }
        if cli.all {
            self.metrics = self.metrics.with_all_enabled();
        }
        self
    }

    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<()> {
        for (name, secs) in [("sleep_secs", self.sleep_secs), ("nolog_secs", self.nolog_secs)] {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(CoreError::config(format!(
                    "{} must be a positive number of seconds, got {}",
                    name, secs
                )));
            }
            if secs > MAX_INTERVAL_SECS || Duration::try_from_secs_f64(secs).is_err() {
                return Err(CoreError::config(format!(
                    "{} must be at most {} seconds, got {}",
                    name, MAX_INTERVAL_SECS, secs
                )));
            }
        }

        if matches!(&self.output_path, Some(path) if path.as_os_str().is_empty()) {
            return Err(CoreError::config("output_path must not be empty"));
        }

        Ok(())
    }

    pub fn logging_enabled(&self) -> bool {
        self.output_path.is_some()
    }

    /// Get sleep interval as Duration, clamped to `MAX_INTERVAL_SECS`
    pub fn sleep_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.sleep_secs.min(MAX_INTERVAL_SECS)).unwrap_or(Duration::ZERO)
    }
}

/// CLI configuration (temporary struct for CLI parsing)
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub interval_secs: Option<f64>,
    pub output_path: Option<PathBuf>,
    pub max_entries: Option<usize>,
    pub no_log: bool,
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.sleep_interval(), Duration::from_secs(1800));
        assert_eq!(config.output_path, Some(PathBuf::from("log.json")));
        assert_eq!(config.max_log_entries, 0);
        assert!(config.logging_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nolog_override() {
        let cli = CliConfig {
            no_log: true,
            output_path: Some(PathBuf::from("elsewhere.json")),
            ..CliConfig::default()
        };
        let config = Config::default().apply_cli_overrides(&cli);
        assert!(!config.logging_enabled());
        assert_eq!(config.sleep_interval(), Duration::from_millis(1250));
    }

    #[test]
    fn test_all_override() {
        let cli = CliConfig {
            all: true,
            ..CliConfig::default()
        };
        let config = Config::default().apply_cli_overrides(&cli);
        assert!(config.metrics.is_enabled("show_top_processes"));
        assert!(config.metrics.is_enabled("show_battery_status"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"sleep_secs": 60, "max_log_entries": 100, "metrics": {"show_swap_memory": true}}"#,
        )
        .unwrap();

        let cli = CliConfig {
            max_entries: Some(5),
            ..CliConfig::default()
        };
        let config = Config::load(Some(&cli), Some(path.as_path())).unwrap();
        assert_eq!(config.sleep_interval(), Duration::from_secs(60));
        assert_eq!(config.max_log_entries, 5);
        assert_eq!(config.output_path, Some(PathBuf::from("log.json")));
        assert!(config.metrics.is_enabled("show_swap_memory"));
        assert!(config.metrics.is_enabled("show_uptime"));
    }

    #[test]
    fn test_null_output_path_disables_logging() {
        let config: Config = serde_json::from_str(r#"{"output_path": null}"#).unwrap();
        assert!(!config.logging_enabled());
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(None, Some(missing.as_path())), Err(CoreError::Config(_))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Config::load(None, Some(broken.as_path())), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_interval() {
        let cli = CliConfig {
            interval_secs: Some(0.0),
            ..CliConfig::default()
        };
        let config = Config::default().apply_cli_overrides(&cli);
        assert!(config.validate().is_err());

        let config = Config {
            nolog_secs: f64::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_interval() {
        let cli = CliConfig {
            interval_secs: Some(1e20),
            ..CliConfig::default()
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(
            Config::load(Some(&cli), Some(path.as_path())),
            Err(CoreError::Config(_))
        ));

        fs::write(&path, r#"{"sleep_secs": 5e18}"#).unwrap();
        assert!(matches!(Config::load(None, Some(path.as_path())), Err(CoreError::Config(_))));

        let cli = CliConfig {
            interval_secs: Some(MAX_INTERVAL_SECS),
            ..CliConfig::default()
        };
        let config = Config::load(Some(&cli), Some(path.as_path()));
        assert!(config.is_ok());
    }

    #[test]
    fn test_sleep_interval_never_panics() {
        let config = Config {
            sleep_secs: 1e20,
            ..Config::default()
        };
        assert_eq!(config.sleep_interval(), Duration::from_secs_f64(MAX_INTERVAL_SECS));

        let config = Config {
            sleep_secs: -1.0,
            ..Config::default()
        };
        assert_eq!(config.sleep_interval(), Duration::ZERO);
    }
}
