//! Client configuration loaded from YAML.
//!
//! ```yaml
//! library_path: C:\Tools\Hand2Note\x64\h2napi.dll   # optional
//! poll_interval_ms: 300
//! fire_initial_start: true
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos surface early.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::monitor::{DEFAULT_POLL_INTERVAL, LivenessMonitorBuilder};
use crate::{ApiError, LivenessMonitor, Result};

/// File name of the native API library.
pub const LIBRARY_NAME: &str = "h2napi.dll";

/// Settings for [`crate::Hand2Note::from_config`] and the liveness monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Explicit path to `h2napi.dll`. When unset, the library is looked up
    /// in an architecture subdirectory (`x64` or `x86`).
    pub library_path: Option<PathBuf>,
    pub poll_interval_ms: u64,
    pub fire_initial_start: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            fire_initial_start: true,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, "client configuration")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|source| ApiError::file_error(path.to_path_buf(), source))?;
        let config = Self::parse(&yaml, &path.display().to_string())?;
        debug!(path = %path.display(), ?config, "Loaded client configuration");
        Ok(config)
    }

    fn parse(yaml: &str, context: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| ApiError::config_error(context, e.to_string()))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| ApiError::config_error("client configuration", e.to_string()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Path the native library is loaded from.
    pub fn resolved_library_path(&self) -> PathBuf {
        self.library_path.clone().unwrap_or_else(default_library_path)
    }

    /// Monitor builder preset with this configuration's settings.
    pub fn monitor_builder(&self) -> LivenessMonitorBuilder {
        LivenessMonitor::builder()
            .poll_interval(self.poll_interval())
            .fire_initial_start(self.fire_initial_start)
    }
}

/// `x64\h2napi.dll` or `x86\h2napi.dll`, matching the pointer width of the
/// current process.
pub fn default_library_path() -> PathBuf {
    let arch = if cfg!(target_pointer_width = "64") { "x64" } else { "x86" };
    Path::new(arch).join(LIBRARY_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_monitor() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert!(config.fire_initial_start);
        assert!(config.library_path.is_none());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ClientConfig::from_yaml_str("poll_interval_ms: 1000\n").unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert!(config.fire_initial_start);
        assert_eq!(ClientConfig::from_yaml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = ClientConfig::from_yaml_str("poll_interval: 1000\n");
        assert!(matches!(result, Err(ApiError::Config { .. })));
    }

    #[test]
    fn default_library_path_follows_pointer_width() {
        let path = ClientConfig::default().resolved_library_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LIBRARY_NAME));
        let arch = path.parent().and_then(|p| p.to_str()).unwrap();
        if cfg!(target_pointer_width = "64") {
            assert_eq!(arch, "x64");
        } else {
            assert_eq!(arch, "x86");
        }
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "library_path: /opt/h2n/h2napi.dll").unwrap();
        writeln!(file, "fire_initial_start: false").unwrap();

        let config = ClientConfig::from_path(file.path()).unwrap();
        assert_eq!(config.resolved_library_path(), PathBuf::from("/opt/h2n/h2napi.dll"));
        assert!(!config.fire_initial_start);
        assert_eq!(config.poll_interval_ms, 300);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        match ClientConfig::from_path(&path) {
            Err(ApiError::File { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected File error, got {other:?}"),
        }
    }

    #[test]
    fn yaml_round_trip_preserves_settings() {
        let config = ClientConfig {
            library_path: Some(PathBuf::from("h2n/h2napi.dll")),
            poll_interval_ms: 50,
            fire_initial_start: false,
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(ClientConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn monitor_builder_carries_settings() {
        let config = ClientConfig { poll_interval_ms: 25, ..ClientConfig::default() };
        let rendered = format!("{:?}", config.monitor_builder());
        assert!(rendered.contains("25ms"));
    }
}
