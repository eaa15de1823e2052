use std::error::Error;
use std::sync::Mutex;
use std::time::Duration;

use crate::telemetry::client::{Properties, TelemetryClient};

/// One captured telemetry call
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryRecord {
    Event {
        name: String,
        properties: Properties,
    },
    Exception {
        message: String,
        properties: Properties,
    },
    Metric {
        name: String,
        value: f64,
    },
    Dependency(DependencyRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependencyRecord {
    pub name: String,
    pub target: String,
    pub duration: Duration,
    pub success: bool,
    pub result_code: Option<u16>,
}

/// Keeps every call in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    records: Mutex<Vec<TelemetryRecord>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.lock().clone()
    }

    pub fn dependencies(&self) -> Vec<DependencyRecord> {
        self.lock()
            .iter()
            .filter_map(|record| match record {
                TelemetryRecord::Dependency(dep) => Some(dep.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, record: TelemetryRecord) {
        self.lock().push(record);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TelemetryRecord>> {
        // A panic while holding the lock leaves the vector intact.
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TelemetryClient for RecordingTelemetry {
    fn track_event(&self, name: &str, properties: &Properties) {
        self.push(TelemetryRecord::Event {
            name: name.to_string(),
            properties: properties.clone(),
        });
    }

    fn track_exception(&self, error: &dyn Error, properties: &Properties) {
        self.push(TelemetryRecord::Exception {
            message: error.to_string(),
            properties: properties.clone(),
        });
    }

    fn track_metric(&self, name: &str, value: f64) {
        self.push(TelemetryRecord::Metric {
            name: name.to_string(),
            value,
        });
    }

    fn track_dependency(
        &self,
        name: &str,
        target: &str,
        duration: Duration,
        success: bool,
        result_code: Option<u16>,
    ) {
        self.push(TelemetryRecord::Dependency(DependencyRecord {
            name: name.to_string(),
            target: target.to_string(),
            duration,
            success,
            result_code,
        }));
    }
}
