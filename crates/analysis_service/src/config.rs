use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 5000);
pub const DEFAULT_COMMENT_PAGE_SIZE: usize = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found. Set it in the environment or a .env file")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    PartialTls,
}

/// Certificate and key used when serving HTTPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Process-wide settings, read once at startup
#[derive(Clone)]
pub struct AppConfig {
    /// Key used for both the YouTube Data API and Gemini
    pub api_key: String,
    pub bind_addr: SocketAddr,
    pub youtube_base_url: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// Upper bound on comments analysed per video
    pub comment_page_size: usize,
    /// Timeout applied to each external call
    pub request_timeout: Duration,
    pub tls: Option<TlsPaths>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("comment_page_size", &self.comment_page_size)
            .field("request_timeout", &self.request_timeout)
            .field("tls", &self.tls)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?;

        let bind_addr: SocketAddr = parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR)?;

        let comment_page_size: usize = parse_or(
            "COMMENT_PAGE_SIZE",
            get("COMMENT_PAGE_SIZE"),
            DEFAULT_COMMENT_PAGE_SIZE,
        )?;
        if comment_page_size == 0 {
            return Err(invalid("COMMENT_PAGE_SIZE", "0", "must be at least 1"));
        }

        let timeout_secs: u64 = parse_or(
            "REQUEST_TIMEOUT_SECS",
            get("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(invalid("REQUEST_TIMEOUT_SECS", "0", "must be at least 1"));
        }

        let tls = match (get("TLS_CERT_PATH"), get("TLS_KEY_PATH")) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert_path: cert.into(),
                key_path: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialTls),
        };

        Ok(Self {
            api_key,
            bind_addr,
            youtube_base_url: get("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| youtube_client::DEFAULT_BASE_URL.to_string()),
            gemini_base_url: get("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| gemini_client::DEFAULT_BASE_URL.to_string()),
            gemini_model: get("GEMINI_MODEL")
                .unwrap_or_else(|| gemini_client::DEFAULT_MODEL.to_string()),
            comment_page_size,
            request_timeout: Duration::from_secs(timeout_secs),
            tls,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e| invalid(key, &value, e)),
        None => Ok(default),
    }
}
