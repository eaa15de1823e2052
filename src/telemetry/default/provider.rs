use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;

use crate::telemetry::api::TelemetryProvider;
use crate::telemetry::config::TelemetryConfig;
use crate::telemetry::error::TelemetryError;
use crate::telemetry::resource::build_resource;

/// Default provider
/// - Exports to an OTLP collector if configured
/// - Falls back to no export if no endpoint
pub struct DefaultProvider;

impl TelemetryProvider for DefaultProvider {
    async fn build_tracer_provider(
        &self,
        config: &TelemetryConfig,
    ) -> Result<SdkTracerProvider, TelemetryError> {
        let connection = config.parsed_connection_string()?;
        let resource = build_resource(config, connection.as_ref());

        let provider = match &config.otlp_endpoint {
            Some(endpoint) => {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(endpoint)
                    .build()?;

                SdkTracerProvider::builder()
                    .with_batch_exporter(exporter)
                    .with_resource(resource)
                    .build()
            }
            None => SdkTracerProvider::builder().with_resource(resource).build(),
        };

        Ok(provider)
    }
}
