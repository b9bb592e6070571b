/*!
 * Configuration types for plugsign
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PluginSignError, Result};

/// Default signing API base
pub const DEFAULT_API_URL: &str = "https://grafana.com/api";

/// Environment variable overriding the signing API base
pub const API_URL_ENV: &str = "GRAFANA_COM_URL";

/// Path of the signing endpoint below the API base
pub const SIGN_ENDPOINT_PATH: &str = "/plugins/ci/sign";

/// Main configuration for a signing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignConfig {
    /// Plugin content directory to manifest
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Full signing endpoint URL (overrides the API base)
    #[serde(default)]
    pub signing_url: Option<String>,

    /// Signing request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stderr)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,

    /// Build and print the manifest without signing it
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
            signing_url: None,
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
            log_file: None,
            verbose: false,
            dry_run: false,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions for serde
fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_timeout_secs() -> u64 {
    30
}

impl SignConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PluginSignError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents).map_err(|e| {
            PluginSignError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Resolve the signing endpoint: explicit URL, then `GRAFANA_COM_URL`, then the default
    pub fn signing_url(&self) -> String {
        self.resolve_signing_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_signing_url(&self, api_url_env: Option<String>) -> String {
        if let Some(url) = &self.signing_url {
            return url.clone();
        }

        let base = api_url_env
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        format!("{}{}", base.trim_end_matches('/'), SIGN_ENDPOINT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SignConfig::default();
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.signing_url.is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_default_signing_url() {
        let config = SignConfig::default();
        assert_eq!(
            config.resolve_signing_url(None),
            "https://grafana.com/api/plugins/ci/sign"
        );
    }

    #[test]
    fn test_env_api_base() {
        let config = SignConfig::default();
        assert_eq!(
            config.resolve_signing_url(Some("https://grafana-dev.com/api/".to_string())),
            "https://grafana-dev.com/api/plugins/ci/sign"
        );
        assert_eq!(
            config.resolve_signing_url(Some("  ".to_string())),
            "https://grafana.com/api/plugins/ci/sign"
        );
    }

    #[test]
    fn test_explicit_url_wins() {
        let config = SignConfig {
            signing_url: Some("http://127.0.0.1:9000/sign".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_signing_url(Some("https://ignored/api".to_string())),
            "http://127.0.0.1:9000/sign"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
dist_dir = "build/plugin"
timeout_secs = 5
log_level = "debug"
dry_run = true
"#
        )
        .unwrap();

        let config = SignConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dist_dir, PathBuf::from("build/plugin"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.dry_run);
        assert!(!config.verbose);
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();

        let err = SignConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PluginSignError::Config(_)));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
