//! Configuration options for the Papo Reto client

use std::time::Duration;

use crate::error::{Error, Result};

/// Default API root, including the versioned path prefix
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Storage key the session credential lives under
pub const DEFAULT_SESSION_KEY: &str = "token";

/// Environment variable overriding the API root
pub const ENV_API_URL: &str = "PAPO_RETO_API_URL";

/// Environment variable overriding the session key
pub const ENV_SESSION_KEY: &str = "PAPO_RETO_SESSION_KEY";

/// Configuration options for the Papo Reto client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The API root every endpoint is appended to
    pub base_url: String,

    /// The key the session credential is stored under
    pub session_key: String,

    /// The request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            request_timeout: None,
            client_info: format!("papo-reto-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Build options from the environment, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            options = options.with_base_url(&url)?;
        }

        if let Ok(key) = std::env::var(ENV_SESSION_KEY) {
            options = options.with_session_key(&key)?;
        }

        Ok(options)
    }

    /// Set the API root. The value must be an absolute URL.
    pub fn with_base_url(mut self, value: &str) -> Result<Self> {
        url::Url::parse(value)?;
        self.base_url = value.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Set the session key
    pub fn with_session_key(mut self, value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::config("session key cannot be empty"));
        }
        self.session_key = value.to_string();
        Ok(self)
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}
