use std::env;

use crate::config::AppConfig;
use crate::telemetry::connection::ConnectionString;
use crate::telemetry::error::TelemetryError;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty human-readable format with colors (for local dev)
    #[default]
    Pretty,
    /// One JSON object per line (for log collectors)
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Process-level telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub otlp_endpoint: Option<String>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub connection_string: Option<String>,
}

impl TelemetryConfig {
    /// Create config from environment variables.
    ///
    /// The connection string is not read here; it belongs to [`AppConfig`],
    /// see [`TelemetryConfig::for_app`].
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string()),
            service_version: env::var("OTEL_SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            otlp_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: LogFormat::from_env_value(env::var("LOG_FORMAT").ok().as_deref()),
            connection_string: None,
        }
    }

    /// Environment config plus the connection string already resolved in `app`
    pub fn for_app(app: &AppConfig) -> Self {
        Self {
            connection_string: app.telemetry_connection_string.clone(),
            ..Self::from_env()
        }
    }

    /// Create a new config with explicit values
    pub fn new(service_name: impl Into<String>, service_version: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            otlp_endpoint: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            connection_string: None,
        }
    }

    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::default()
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = Some(connection_string.into());
        self
    }

    /// Parsed connection string, `None` when not configured
    pub fn parsed_connection_string(&self) -> Result<Option<ConnectionString>, TelemetryError> {
        self.connection_string
            .as_deref()
            .map(ConnectionString::parse)
            .transpose()
    }
}

#[derive(Default)]
pub struct TelemetryConfigBuilder {
    service_name: Option<String>,
    service_version: Option<String>,
    otlp_endpoint: Option<String>,
    log_level: Option<String>,
    log_format: Option<LogFormat>,
    connection_string: Option<String>,
}

impl TelemetryConfigBuilder {
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    pub fn service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    pub fn otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    pub fn json(self) -> Self {
        self.log_format(LogFormat::Json)
    }

    pub fn pretty(self) -> Self {
        self.log_format(LogFormat::Pretty)
    }

    pub fn connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = Some(connection_string.into());
        self
    }

    pub fn build(self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self
                .service_name
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()),
            service_version: self
                .service_version
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            otlp_endpoint: self.otlp_endpoint,
            log_level: self.log_level.unwrap_or_else(|| "info".to_string()),
            log_format: self.log_format.unwrap_or_default(),
            connection_string: self.connection_string,
        }
    }
}
