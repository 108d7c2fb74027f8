//! Configuration types and loading
//!
//! Layering: built-in defaults, then an optional TOML file, then
//! `PRODTRACK_`-prefixed environment variables (`__` separates nested keys,
//! e.g. `PRODTRACK_REMOTE__ENDPOINT_URL`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{is_valid_iso_date, SiteClock};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Local record cache configuration
    pub store: StoreConfig,

    /// Remote spreadsheet endpoint configuration
    pub remote: RemoteConfig,

    /// Site-specific settings
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: String,
    /// Seed a deterministic demo production set on first start
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Spreadsheet-backed action endpoint; remote sync is disabled when unset
    pub endpoint_url: Option<String>,
    /// Per-request timeout; unset leaves the transport default in place
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Offset from UTC used for "today" and "this month"
    pub timezone_offset_hours: i32,
    /// Processes shown on the dashboard even when they have no entries
    pub known_processes: Vec<String>,
    /// Product categories offered to the entry forms
    pub known_categories: Vec<String>,
    /// Off-days written to an empty store on first start
    pub default_off_days: Vec<OffDaySeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OffDaySeed {
    pub date: String,
    pub description: String,
}

impl OffDaySeed {
    fn new(date: &str, description: &str) -> Self {
        Self {
            date: date.to_string(),
            description: description.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn clock(&self) -> SiteClock {
        SiteClock::new(self.timezone_offset_hours)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            store: StoreConfig {
                data_dir: "./data".to_string(),
                seed_demo_data: false,
            },
            remote: RemoteConfig::default(),
            site: SiteConfig {
                timezone_offset_hours: SiteClock::DEFAULT_OFFSET_HOURS,
                known_processes: ["Mixing", "Encapsulation", "Drying", "Polishing", "Packing"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                known_categories: ["Softgel", "Hardgel", "Liquid"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                default_off_days: vec![
                    OffDaySeed::new("2025-01-01", "New Year's Day"),
                    OffDaySeed::new("2025-01-29", "Chinese New Year"),
                    OffDaySeed::new("2025-03-31", "Hari Raya Aidilfitri"),
                    OffDaySeed::new("2025-05-01", "Labour Day"),
                    OffDaySeed::new("2025-08-31", "Merdeka Day"),
                    OffDaySeed::new("2025-09-16", "Malaysia Day"),
                    OffDaySeed::new("2025-12-25", "Christmas Day"),
                ],
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config source error: {0}")]
    Source(#[from] config::ConfigError),
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for crate::error::PtError {
    fn from(err: ConfigError) -> Self {
        crate::error::PtError::Config(err.to_string())
    }
}

impl AppConfig {
    /// Environment variable naming an explicit config file
    pub const FILE_ENV: &'static str = "PRODTRACK_CONFIG";

    /// Load configuration from defaults, an optional file, and the environment
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&AppConfig::default())?;

        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("prodtrack").required(false),
        };

        let loaded: AppConfig = config::Config::builder()
            .add_source(defaults)
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("PRODTRACK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("site.known_processes")
                    .with_list_parse_key("site.known_categories"),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Load using the file named by `PRODTRACK_CONFIG`, if any
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(Self::FILE_ENV) {
            Ok(path) => Self::load(Some(Path::new(&path))),
            Err(_) => Self::load(None),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Blank means no remote, same as leaving the key out
        if let Some(url) = self.remote.endpoint_url.as_deref().map(str::trim) {
            if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: "remote.endpoint_url".into(),
                    message: "must be an http(s) URL".into(),
                });
            }
        }
        if self.site.known_processes.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "site.known_processes".into(),
                message: "must list at least one process".into(),
            });
        }
        if !(-12..=14).contains(&self.site.timezone_offset_hours) {
            return Err(ConfigError::InvalidValue {
                key: "site.timezone_offset_hours".into(),
                message: "must be between -12 and 14".into(),
            });
        }
        if let Some(bad) = self
            .site
            .default_off_days
            .iter()
            .find(|d| !is_valid_iso_date(&d.date))
        {
            return Err(ConfigError::InvalidValue {
                key: "site.default_off_days".into(),
                message: format!("{} is not a YYYY-MM-DD date", bad.date),
            });
        }
        Ok(())
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.remote.endpoint_url.is_none());
        assert_eq!(config.site.known_processes[0], "Mixing");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig::default();
        let addr = config.server_addr();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prodtrack.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[remote]
endpoint_url = "https://script.example.com/exec"
request_timeout_seconds = 20
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.remote.endpoint_url.as_deref(),
            Some("https://script.example.com/exec")
        );
        assert_eq!(config.remote.request_timeout_seconds, Some(20));
        assert_eq!(config.site.known_processes.len(), 5);
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = AppConfig::default();
        config.remote.endpoint_url = Some("ftp://example.com".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_blank_endpoint_means_disabled() {
        let mut config = AppConfig::default();
        config.remote.endpoint_url = Some(String::new());
        assert!(config.validate().is_ok());
        config.remote.endpoint_url = Some("   ".into());
        assert!(config.validate().is_ok());
        config.remote.endpoint_url = Some(" https://script.example.com/exec ".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_off_day_seed() {
        let mut config = AppConfig::default();
        config.site.default_off_days.push(OffDaySeed::new("2025-02-30", "Nope"));
        assert!(config.validate().is_err());
    }
}
