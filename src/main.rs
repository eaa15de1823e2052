use std::process::ExitCode;
use std::sync::Arc;

use product_catalog_client::telemetry::{self, TelemetryClient, TracingTelemetry};
use product_catalog_client::{AppConfig, ProductsController};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Arc::new(AppConfig::from_env());

    let provider = match telemetry::init(&config).await {
        Ok(provider) => Some(provider),
        Err(err) => {
            eprintln!("telemetry disabled: {err}");
            None
        }
    };
    info!(api_base_url = %config.api_base_url, "Loaded configuration");

    let client: Arc<dyn TelemetryClient> = Arc::new(TracingTelemetry);
    let controller = ProductsController::new(config, client);

    let mut changes = controller.subscribe();
    let watcher = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let state = changes.borrow_and_update().clone();
            info!(
                loading = state.loading,
                products = state.products.len(),
                error = state.error.as_deref(),
                "State changed"
            );
        }
    });

    controller.fetch_products(false).await;
    let state = controller.state();

    drop(controller);
    let _ = watcher.await;

    let code = match &state.error {
        Some(message) => {
            error!(error = %message, "Could not load products");
            ExitCode::FAILURE
        }
        None => match serde_json::to_string_pretty(&state.products) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(error = %err, "Could not render products");
                ExitCode::FAILURE
            }
        },
    };

    if let Some(provider) = provider {
        if let Err(err) = provider.shutdown() {
            eprintln!("failed to flush traces: {err}");
        }
    }

    code
}
