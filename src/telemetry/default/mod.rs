//! Default telemetry provider.
//!
//! Exports traces to an OTLP collector when `OTEL_EXPORTER_OTLP_ENDPOINT`
//! is set; otherwise spans are recorded but not exported.

mod provider;

pub use provider::DefaultProvider;
