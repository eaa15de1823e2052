use std::collections::BTreeMap;
use std::str::FromStr;

use crate::telemetry::error::TelemetryError;

const INSTRUMENTATION_KEY: &str = "instrumentationkey";
const INGESTION_ENDPOINT: &str = "ingestionendpoint";
const LIVE_ENDPOINT: &str = "liveendpoint";
const APPLICATION_ID: &str = "applicationid";

/// Parsed Application Insights connection string
/// (`InstrumentationKey=...;IngestionEndpoint=...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub instrumentation_key: String,
    pub ingestion_endpoint: Option<String>,
    pub live_endpoint: Option<String>,
    pub application_id: Option<String>,
    /// Remaining pairs, keys lower-cased
    pub other: BTreeMap<String, String>,
}

impl ConnectionString {
    /// Keys are case-insensitive; blank segments are skipped.
    pub fn parse(raw: &str) -> Result<Self, TelemetryError> {
        let mut pairs = BTreeMap::new();

        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                TelemetryError::Config(format!(
                    "connection string segment `{segment}` is not a key=value pair"
                ))
            })?;
            pairs.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }

        let instrumentation_key = pairs
            .remove(INSTRUMENTATION_KEY)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TelemetryError::Config("connection string has no InstrumentationKey".to_string())
            })?;

        Ok(Self {
            instrumentation_key,
            ingestion_endpoint: pairs.remove(INGESTION_ENDPOINT),
            live_endpoint: pairs.remove(LIVE_ENDPOINT),
            application_id: pairs.remove(APPLICATION_ID),
            other: pairs,
        })
    }
}

impl FromStr for ConnectionString {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
