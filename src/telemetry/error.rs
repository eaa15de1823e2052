use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Exporter error: {0}")]
    Exporter(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Initialization error: {0}")]
    Init(String),
}

impl From<opentelemetry_otlp::ExporterBuildError> for TelemetryError {
    fn from(err: opentelemetry_otlp::ExporterBuildError) -> Self {
        Self::Exporter(err.to_string())
    }
}

impl From<tracing_subscriber::util::TryInitError> for TelemetryError {
    fn from(err: tracing_subscriber::util::TryInitError) -> Self {
        Self::Init(err.to_string())
    }
}
