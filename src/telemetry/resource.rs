use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};

use crate::telemetry::config::TelemetryConfig;
use crate::telemetry::connection::ConnectionString;

pub const INSTRUMENTATION_KEY_ATTR: &str = "appinsights.instrumentation_key";
pub const INGESTION_ENDPOINT_ATTR: &str = "appinsights.ingestion_endpoint";

/// Get base attributes for any resource
pub fn base_attributes(config: &TelemetryConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new(SERVICE_NAME, config.service_name.clone()),
        KeyValue::new(SERVICE_VERSION, config.service_version.clone()),
    ]
}

/// Attributes identifying the Application Insights resource
pub fn connection_attributes(connection: &ConnectionString) -> Vec<KeyValue> {
    let mut attrs = vec![KeyValue::new(
        INSTRUMENTATION_KEY_ATTR,
        connection.instrumentation_key.clone(),
    )];
    if let Some(endpoint) = &connection.ingestion_endpoint {
        attrs.push(KeyValue::new(INGESTION_ENDPOINT_ATTR, endpoint.clone()));
    }
    attrs
}

/// Build resource with base attributes plus connection attributes when configured
pub fn build_resource(config: &TelemetryConfig, connection: Option<&ConnectionString>) -> Resource {
    let mut attrs = base_attributes(config);
    if let Some(connection) = connection {
        attrs.extend(connection_attributes(connection));
    }
    Resource::builder().with_attributes(attrs).build()
}
