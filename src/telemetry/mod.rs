//! Telemetry: the application-level [`TelemetryClient`] used by the product
//! controller, and process-level tracing initialisation built on OpenTelemetry.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! // Install the tracing subscriber from the environment and app config
//! let provider = telemetry::init(&app_config).await?;
//!
//! // Hand a client to whatever records events
//! let client: Arc<dyn TelemetryClient> = Arc::new(TracingTelemetry);
//!
//! // Flush before exit
//! provider.shutdown()?;
//! ```
//!
//! ## Log Formats
//!
//! - [`LogFormat::Pretty`]: Human-readable with colors (default for local dev)
//! - [`LogFormat::Json`]: One JSON object per line
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `OTEL_SERVICE_NAME` | Service name | `CARGO_PKG_NAME` |
//! | `OTEL_SERVICE_VERSION` | Service version | `CARGO_PKG_VERSION` |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | OTLP endpoint | - |
//! | `RUST_LOG` | Log level filter | `info` |
//! | `LOG_FORMAT` | `pretty` or `json` | `pretty` |
//! | `APPINSIGHTS_CONNECTION_STRING` | Application Insights resource, read via [`AppConfig`](crate::AppConfig) | - |

pub mod api;
pub mod client;
pub mod config;
pub mod connection;
pub mod default;
pub mod error;
pub mod recording;
pub mod resource;
pub mod trace;

pub use api::{init, init_with_config, init_with_provider, TelemetryProvider};
pub use client::{NoopTelemetry, Properties, TelemetryClient, TracingTelemetry};
pub use config::{LogFormat, TelemetryConfig, TelemetryConfigBuilder};
pub use connection::ConnectionString;
pub use error::TelemetryError;
pub use recording::{DependencyRecord, RecordingTelemetry, TelemetryRecord};
