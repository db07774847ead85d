//! Connection settings for the PowerScale API

use std::fmt;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

pub const ENV_ENDPOINT: &str = "POWERSCALE_ENDPOINT";
pub const ENV_USERNAME: &str = "POWERSCALE_USERNAME";
pub const ENV_PASSWORD: &str = "POWERSCALE_PASSWORD";
pub const ENV_INSECURE: &str = "POWERSCALE_INSECURE";
pub const ENV_TIMEOUT: &str = "POWERSCALE_TIMEOUT";

/// Connection settings
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. "https://10.0.0.1:8080"
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Accept self-signed certificates
    pub insecure: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 2000;

    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            insecure: false,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load settings from `POWERSCALE_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ClientError::Configuration(format!("{} is not set", key)))
        };

        let mut config = Self::new(
            required(ENV_ENDPOINT)?,
            required(ENV_USERNAME)?,
            required(ENV_PASSWORD)?,
        );

        if let Some(raw) = lookup(ENV_INSECURE) {
            config.insecure = parse_bool(&raw).ok_or_else(|| {
                ClientError::Configuration(format!("{} must be true or false, got '{}'", ENV_INSECURE, raw))
            })?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Configuration(format!(
                    "{} must be a number of seconds, got '{}'",
                    ENV_TIMEOUT, raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> ClientResult<()> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ClientError::Configuration(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::Configuration(format!(
                "Invalid endpoint '{}': unsupported scheme '{}'",
                self.endpoint, other
            ))),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"********")
            .field("insecure", &self.insecure)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
