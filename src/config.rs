use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: url::Url,
    pub api_token: Option<String>,
    pub token_file: PathBuf,
    pub http_timeout: Duration,
    pub poll_interval: Duration,
    pub download_dir: PathBuf,
    pub max_upload_bytes: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let raw_base = get_env("API_BASE_URL")?;
        Ok(Self {
            api_base_url: parse_base_url(&raw_base)?,
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            token_file: env::var("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".recruitment-admin-token")),
            http_timeout: positive_secs(
                "HTTP_TIMEOUT_SECS",
                get_env_parse_or("HTTP_TIMEOUT_SECS", 30)?,
            )?,
            poll_interval: positive_secs(
                "POLL_INTERVAL_SECS",
                get_env_parse_or("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?,
            )?,
            download_dir: env::var("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./downloads")),
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    /// Configuration pointing at `base_url` with defaults everywhere else.
    pub fn for_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(base_url)?,
            api_token: None,
            token_file: PathBuf::from(".recruitment-admin-token"),
            http_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            download_dir: PathBuf::from("./downloads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        })
    }
}

/// Base URLs are joined against relative paths, so they must end with `/`.
fn parse_base_url(raw: &str) -> Result<url::Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    url::Url::parse(&normalized)
        .map_err(|e| Error::Config(format!("Invalid value for API_BASE_URL: {}", e)))
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn positive_secs(name: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::Config(format!("{} must be at least 1 second", name)));
    }
    Ok(Duration::from_secs(secs))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = Config::for_base_url("http://localhost:5000/api").unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:5000/api/");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn rejects_garbage_base_url() {
        assert!(matches!(
            Config::for_base_url("not a url"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zero_second_intervals_are_rejected() {
        match positive_secs("POLL_INTERVAL_SECS", 0) {
            Err(Error::Config(msg)) => {
                assert_eq!(msg, "POLL_INTERVAL_SECS must be at least 1 second")
            }
            other => panic!("expected config error, got {:?}", other),
        }
        assert_eq!(
            positive_secs("POLL_INTERVAL_SECS", 15).unwrap(),
            Duration::from_secs(15)
        );
    }
}
