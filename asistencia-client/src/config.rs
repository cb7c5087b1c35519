//! Client configuration

use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Default API root of the attendance backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How a registration response is recognised as successful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptancePolicy {
    /// Only `success: true` or returned identifiers count as success
    #[default]
    Strict,
    /// Also accept error texts that announce a successful registration
    /// (older backends answer some successful registrations with an error status)
    LegacyText,
}

impl std::str::FromStr for AcceptancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "legacy" | "legacy-text" | "legacy_text" => Ok(Self::LegacyText),
            other => Err(format!("unknown acceptance policy: {other}")),
        }
    }
}

/// Client configuration for connecting to the attendance backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | API_BASE_URL | http://localhost:3000/api | API root |
/// | API_TIMEOUT_SECS | 10 | Request timeout |
/// | CODE_SEQUENCE_FLOOR | 1 | Lowest sequence handed out for new codes |
/// | REGISTRATION_ACCEPTANCE | strict | `strict` or `legacy` |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Lowest sequence number the resolver will return
    pub sequence_floor: u64,

    /// Registration success detection
    pub acceptance: AcceptancePolicy,
}

impl ClientConfig {
    /// Create a configuration for the given API root
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sequence_floor: 1,
            acceptance: AcceptancePolicy::Strict,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        );
        if let Some(secs) = std::env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(floor) = std::env::var("CODE_SEQUENCE_FLOOR")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config = config.with_sequence_floor(floor);
        }
        if let Some(policy) = std::env::var("REGISTRATION_ACCEPTANCE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.acceptance = policy;
        }
        config
    }

    /// Replace the API root, keeping the other settings
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the sequence floor (0 is treated as 1)
    pub fn with_sequence_floor(mut self, floor: u64) -> Self {
        self.sequence_floor = floor.max(1);
        self
    }

    pub fn with_acceptance(mut self, policy: AcceptancePolicy) -> Self {
        self.acceptance = policy;
        self
    }

    /// Reject configurations that cannot produce a working client
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }

    /// Absolute URL of an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
