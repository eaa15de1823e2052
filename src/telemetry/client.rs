use std::error::Error;
use std::time::Duration;

use tracing::{error, info, warn};

/// Free-form properties attached to events and exceptions
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Application-level telemetry sink.
///
/// Calls are synchronous and must not fail; delivery is the implementation's
/// concern.
pub trait TelemetryClient: Send + Sync {
    fn track_event(&self, name: &str, properties: &Properties);

    fn track_exception(&self, error: &dyn Error, properties: &Properties);

    fn track_metric(&self, name: &str, value: f64);

    /// Record an outbound call. `result_code` is `None` when no response was received.
    fn track_dependency(
        &self,
        name: &str,
        target: &str,
        duration: Duration,
        success: bool,
        result_code: Option<u16>,
    );
}

/// Forwards telemetry as structured `tracing` events on the `telemetry` target.
///
/// Inside an instrumented span the OpenTelemetry layer exports these as span events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetryClient for TracingTelemetry {
    fn track_event(&self, name: &str, properties: &Properties) {
        info!(
            target: "telemetry",
            kind = "event",
            event_name = name,
            properties = %serde_json::Value::Object(properties.clone()),
            "event"
        );
    }

    fn track_exception(&self, err: &dyn Error, properties: &Properties) {
        error!(
            target: "telemetry",
            kind = "exception",
            error = %err,
            properties = %serde_json::Value::Object(properties.clone()),
            "exception"
        );
    }

    fn track_metric(&self, name: &str, value: f64) {
        info!(
            target: "telemetry",
            kind = "metric",
            event_name = name,
            value,
            "metric"
        );
    }

    fn track_dependency(
        &self,
        name: &str,
        target: &str,
        duration: Duration,
        success: bool,
        result_code: Option<u16>,
    ) {
        let duration_ms = duration.as_secs_f64() * 1000.0;
        if success {
            info!(
                target: "telemetry",
                kind = "dependency",
                event_name = name,
                dependency_target = target,
                duration_ms,
                success,
                result_code,
                "dependency"
            );
        } else {
            warn!(
                target: "telemetry",
                kind = "dependency",
                event_name = name,
                dependency_target = target,
                duration_ms,
                success,
                result_code,
                "dependency"
            );
        }
    }
}

/// Discards all telemetry
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetryClient for NoopTelemetry {
    fn track_event(&self, _name: &str, _properties: &Properties) {}

    fn track_exception(&self, _error: &dyn Error, _properties: &Properties) {}

    fn track_metric(&self, _name: &str, _value: f64) {}

    fn track_dependency(
        &self,
        _name: &str,
        _target: &str,
        _duration: Duration,
        _success: bool,
        _result_code: Option<u16>,
    ) {
    }
}
