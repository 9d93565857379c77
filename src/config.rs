// Console configuration: backend location, request timeout, log destination.
// Values come from CLI flags first, then the environment, then defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use reqwest::Url;
use thiserror::Error;

/// Backend used when neither `--base-url` nor `BANK_BACKEND_URL` is set
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const DEFAULT_LOG_FILE: &str = "bank-console.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("timeout must be greater than zero seconds")]
    ZeroTimeout,
}

/// Raw settings as parsed by clap
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Base URL of the banking backend
    #[arg(long, env = "BANK_BACKEND_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Per-request timeout in seconds (unset: wait indefinitely)
    #[arg(long, env = "BANK_CONSOLE_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Log file used while the interactive dashboard owns the terminal
    #[arg(long, env = "BANK_CONSOLE_LOG", default_value = DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_args(args: &ConfigArgs) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(&args.base_url)?,
            timeout: match args.timeout_secs {
                Some(0) => return Err(ConfigError::ZeroTimeout),
                Some(secs) => Some(Duration::from_secs(secs)),
                None => None,
            },
            log_file: args.log_file.clone(),
        })
    }
}

/// Blank means the default backend; anything else must be an http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.is_empty() {
        DEFAULT_BASE_URL
    } else {
        trimmed
    };

    let url = Url::parse(candidate).map_err(|e| ConfigError::InvalidBaseUrl {
        url: candidate.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBaseUrl {
            url: candidate.to_string(),
            reason: format!("unsupported scheme {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(base_url: &str, timeout_secs: Option<u64>) -> ConfigArgs {
        ConfigArgs {
            base_url: base_url.to_string(),
            timeout_secs,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    #[test]
    fn test_blank_url_uses_default() {
        let url = parse_base_url("  ").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("ftp://bank.local"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_timeout() {
        let config = Config::from_args(&args("https://bank.example", None)).unwrap();
        assert_eq!(config.timeout, None);

        let config = Config::from_args(&args("https://bank.example", Some(30))).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));

        assert!(matches!(
            Config::from_args(&args("https://bank.example", Some(0))),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
