use std::env;

use url::Url;

use crate::products::error::FetchError;

/// Fallback used when `API_BASE_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:7071/api/";

/// Path segment resolved against the base URL
pub const PRODUCTS_PATH: &str = "products";

pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
pub const CONNECTION_STRING_VAR: &str = "APPINSIGHTS_CONNECTION_STRING";

/// Application configuration, resolved once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub telemetry_connection_string: Option<String>,
}

impl AppConfig {
    /// Create config from environment variables
    /// - `API_BASE_URL` falls back to [`DEFAULT_API_BASE_URL`] when absent
    /// - `APPINSIGHTS_CONNECTION_STRING` is optional
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve config through an arbitrary key lookup.
    ///
    /// A value that is present is taken verbatim, even when empty; only an
    /// absent base URL is replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_base_url: lookup(API_BASE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            telemetry_connection_string: lookup(CONNECTION_STRING_VAR),
        }
    }

    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            telemetry_connection_string: None,
        }
    }

    pub fn with_telemetry_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.telemetry_connection_string = Some(connection_string.into());
        self
    }

    /// Resolve `products` against the base URL (RFC 3986 reference resolution).
    pub fn products_url(&self) -> Result<Url, FetchError> {
        let base = Url::parse(&self.api_base_url)?;
        Ok(base.join(PRODUCTS_PATH)?)
    }

    /// Target reported on dependency telemetry: base URL and path concatenated.
    pub fn dependency_target(&self) -> String {
        format!("{}{}", self.api_base_url, PRODUCTS_PATH)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
