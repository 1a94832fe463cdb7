//! Backend connection configuration.
//!
//! Loaded from `NOTEWIRE_*` environment variables (the binary loads `.env`
//! via dotenvy first).
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NOTEWIRE_GRAPHQL_ENDPOINT` | (required) | GraphQL endpoint URL |
//! | `NOTEWIRE_API_KEY` | (none) | API key passed as `x-api-key` |
//! | `NOTEWIRE_TIMEOUT_SECS` | `30` | Query/mutation request timeout |
//! | `NOTEWIRE_EVENT_BUFFER` | `256` | Inbound event channel capacity |

use serde::{Deserialize, Serialize};

use notewire_core::{defaults, Error, Result};

/// Connection settings for the managed notes backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// API key for authentication (optional for open endpoints).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout for queries and mutations (seconds).
    pub timeout_secs: u64,
    /// Capacity of the inbound event channel.
    pub event_buffer: usize,
}

impl BackendConfig {
    /// Create a config for the given endpoint with defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            event_buffer: defaults::EVENT_CHANNEL_CAPACITY,
        }
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("NOTEWIRE_GRAPHQL_ENDPOINT").map_err(|_| {
            Error::Config("NOTEWIRE_GRAPHQL_ENDPOINT is not set".to_string())
        })?;

        let api_key = std::env::var("NOTEWIRE_API_KEY").ok().filter(|k| !k.is_empty());

        let timeout_secs = std::env::var("NOTEWIRE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        let event_buffer = std::env::var("NOTEWIRE_EVENT_BUFFER")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults::EVENT_CHANNEL_CAPACITY)
            .max(1);

        let config = Self {
            endpoint,
            api_key,
            timeout_secs,
            event_buffer,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the inbound event channel capacity.
    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config("endpoint cannot be empty".to_string()));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::Config(format!(
                "endpoint must start with http:// or https://, got: {}",
                self.endpoint
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }

        Ok(())
    }
}
