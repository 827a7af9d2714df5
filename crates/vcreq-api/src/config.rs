//! Server configuration.
//!
//! Loaded from environment variables with defaults suited to local
//! development. Command-line flags in the binary override individual
//! values after loading.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use url::Url;

/// Default port of the core API.
pub const DEFAULT_PORT: u16 = 7000;

/// Default bind address. Loopback only; expose deliberately.
pub const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                var: "VCREQ_LOG_FORMAT".to_string(),
                reason: format!("expected `text` or `json`, got `{other}`"),
            }),
        }
    }
}

/// Adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    /// Public base URLs of this API, advertised as OpenAPI servers.
    pub api_target_urls: Vec<Url>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS,
            port: DEFAULT_PORT,
            api_target_urls: Vec::new(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VCREQ_BIND_ADDRESS` (default: `127.0.0.1`)
    /// - `VCREQ_PORT` (default: `7000`)
    /// - `VCREQ_API_TARGET_URLS`, comma-separated (default: none)
    /// - `VCREQ_LOG_FORMAT`, `text` or `json` (default: `text`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("VCREQ_BIND_ADDRESS") {
            config.bind_address = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                var: "VCREQ_BIND_ADDRESS".to_string(),
                reason: format!("{e}"),
            })?;
        }
        if let Some(raw) = lookup("VCREQ_PORT") {
            config.port = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                var: "VCREQ_PORT".to_string(),
                reason: format!("{e}"),
            })?;
        }
        if let Some(raw) = lookup("VCREQ_API_TARGET_URLS") {
            config.api_target_urls = parse_urls("VCREQ_API_TARGET_URLS", &raw)?;
        }
        if let Some(raw) = lookup("VCREQ_LOG_FORMAT") {
            config.log_format = raw.parse()?;
        }

        Ok(config)
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

fn parse_urls(var: &str, raw: &str) -> Result<Vec<Url>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Url::parse(s).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string())))
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:7000");
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("VCREQ_BIND_ADDRESS", "0.0.0.0"),
            ("VCREQ_PORT", "8080"),
            (
                "VCREQ_API_TARGET_URLS",
                "https://api.example.com, http://localhost:7000,",
            ),
            ("VCREQ_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config
                .api_target_urls
                .iter()
                .map(Url::as_str)
                .collect::<Vec<_>>(),
            vec!["https://api.example.com/", "http://localhost:7000/"]
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[("VCREQ_PORT", "70000")]).unwrap_err();
        assert!(err.to_string().contains("VCREQ_PORT"), "{err}");
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        assert!(matches!(
            load(&[("VCREQ_BIND_ADDRESS", "localhost:7000")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(matches!(
            load(&[("VCREQ_API_TARGET_URLS", "not a url")]),
            Err(ConfigError::InvalidUrl(..))
        ));
    }

    #[test]
    fn invalid_log_format_is_rejected() {
        assert!(load(&[("VCREQ_LOG_FORMAT", "yaml")]).is_err());
    }
}
