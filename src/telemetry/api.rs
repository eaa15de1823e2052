use opentelemetry_sdk::trace::SdkTracerProvider;

use crate::config::AppConfig;
use crate::telemetry::config::TelemetryConfig;
use crate::telemetry::default::DefaultProvider;
use crate::telemetry::error::TelemetryError;
use crate::telemetry::trace::init_subscriber;

/// Trait for tracer provider backends
pub trait TelemetryProvider: Send + Sync {
    /// Build the tracer provider for this backend
    fn build_tracer_provider(
        &self,
        config: &TelemetryConfig,
    ) -> impl std::future::Future<Output = Result<SdkTracerProvider, TelemetryError>> + Send;
}

/// Initialize telemetry with a specific provider.
///
/// Returns the installed tracer provider; call `shutdown` on it before exit
/// to flush pending spans.
pub async fn init_with_provider<P: TelemetryProvider>(
    provider: &P,
    config: &TelemetryConfig,
) -> Result<SdkTracerProvider, TelemetryError> {
    let tracer_provider = provider.build_tracer_provider(config).await?;
    init_subscriber(&tracer_provider, config)?;
    Ok(tracer_provider)
}

/// Initialize telemetry with config
pub async fn init_with_config(config: &TelemetryConfig) -> Result<SdkTracerProvider, TelemetryError> {
    init_with_provider(&DefaultProvider, config).await
}

/// Initialize telemetry from environment and the application config
pub async fn init(app: &AppConfig) -> Result<SdkTracerProvider, TelemetryError> {
    let config = TelemetryConfig::for_app(app);
    init_with_config(&config).await
}
