//! Runtime settings.
//!
//! Settings resolve in three layers: built-in defaults, an optional TOML
//! file, then `SOCWATCH_*` environment overrides. CLI flags are merged on
//! top by the binary.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_subject() -> String {
    "user_404".to_string()
}

fn default_interval_secs() -> u64 {
    2
}

fn default_traffic_seed() -> u64 {
    1420
}

/// Resolved runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the status endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Monitored subject identifier.
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Poll interval in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Initial traffic counter value.
    #[serde(default = "default_traffic_seed")]
    pub traffic_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            subject: default_subject(),
            interval_secs: default_interval_secs(),
            traffic_seed: default_traffic_seed(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("SOCWATCH"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, "http://localhost:8000");
        assert_eq!(settings.subject, "user_404");
        assert_eq!(settings.interval_secs, 2);
        assert_eq!(settings.traffic_seed, 1420);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, r#"endpoint = "http://soc.internal:9000""#).unwrap();
        writeln!(file, r#"subject = "user_101""#).unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.endpoint, "http://soc.internal:9000");
        assert_eq!(settings.subject, "user_101");
        // Untouched keys keep their defaults.
        assert_eq!(settings.interval_secs, 2);
        assert_eq!(settings.traffic_seed, 1420);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/socwatch.toml"))).is_err());
    }
}
