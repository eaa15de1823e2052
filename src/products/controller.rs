use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT};
use serde_json::json;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::products::error::FetchError;
use crate::products::model::Product;
use crate::products::state::{FetchState, ProductStore};
use crate::telemetry::{Properties, TelemetryClient};

pub const FETCH_EVENT: &str = "FetchProducts";
pub const COUNT_METRIC: &str = "ProductsCount";
pub const DEPENDENCY_NAME: &str = "GET /products";
pub const EXCEPTION_CONTEXT: &str = "fetchProducts";

/// Fetches the product list and exposes it as observable [`FetchState`].
pub struct ProductsController {
    http: reqwest::Client,
    config: Arc<AppConfig>,
    telemetry: Arc<dyn TelemetryClient>,
    store: ProductStore,
}

impl ProductsController {
    pub fn new(config: Arc<AppConfig>, telemetry: Arc<dyn TelemetryClient>) -> Self {
        Self::with_client(reqwest::Client::new(), config, telemetry)
    }

    pub fn with_client(
        http: reqwest::Client,
        config: Arc<AppConfig>,
        telemetry: Arc<dyn TelemetryClient>,
    ) -> Self {
        Self {
            http,
            config,
            telemetry,
            store: ProductStore::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> FetchState {
        self.store.snapshot()
    }

    pub fn products(&self) -> Vec<Product> {
        self.store.snapshot().products
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.store.snapshot().error
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.store.subscribe()
    }

    /// Fetch the product list, replacing the stored one on success.
    ///
    /// Returns immediately, with no state change or telemetry, when a fetch is
    /// already in flight. Failures are never returned; they land in
    /// [`FetchState::error`]. `force` is reported on the start event and
    /// otherwise has no effect.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, force: bool) {
        let Some(attempt) = self.store.try_begin() else {
            debug!("fetch already in flight, skipping");
            return;
        };

        let started = Instant::now();
        let mut props = Properties::new();
        props.insert("force".to_string(), json!(force));
        self.telemetry.track_event(FETCH_EVENT, &props);

        let mut status_code = None;
        let result = self.load(&mut status_code).await;
        let success = result.is_ok();

        match result {
            Ok(products) => {
                let count = products.len();
                attempt.store_products(products);
                info!(count, "products loaded");
                self.telemetry.track_metric(COUNT_METRIC, count as f64);
            }
            Err(err) => {
                let message = err.user_message();
                warn!(kind = err.kind(), error = %message, "product fetch failed");
                attempt.record_error(message);
                self.report_failure(&err);
            }
        }

        let duration = started.elapsed();
        attempt.finish();
        self.record_dependency(duration, success, status_code);
    }

    /// Request, check status and decode. `status_code` is filled in as soon as
    /// a response arrives so it survives a later decode failure.
    async fn load(&self, status_code: &mut Option<u16>) -> Result<Vec<Product>, FetchError> {
        let url = self.config.products_url()?;
        debug!(%url, "requesting products");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        *status_code = Some(status.as_u16());

        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), reason_phrase(&response)));
        }

        let body = response.bytes().await?;
        decode_products(&body)
    }

    fn report_failure(&self, err: &FetchError) {
        let mut props = Properties::new();
        props.insert("context".to_string(), json!(EXCEPTION_CONTEXT));
        self.telemetry.track_exception(err, &props);
    }

    fn record_dependency(&self, duration: Duration, success: bool, status_code: Option<u16>) {
        self.telemetry.track_dependency(
            DEPENDENCY_NAME,
            &self.config.dependency_target(),
            duration,
            success,
            status_code,
        );
    }
}

/// Reason phrase the server sent, or the canonical one for the status.
///
/// hyper only keeps the received phrase when it differs from the canonical one.
fn reason_phrase(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// A JSON array becomes the product list, element by element and unchanged;
/// any other JSON value means no products.
pub fn decode_products(body: &[u8]) -> Result<Vec<Product>, FetchError> {
    match serde_json::from_slice::<serde_json::Value>(body)? {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(Product::from).collect()),
        _ => Ok(Vec::new()),
    }
}
