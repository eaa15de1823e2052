//! Client for a remote product catalog.
//!
//! [`ProductsController`] fetches `GET <base>/products`, keeps the result in
//! an observable [`FetchState`] and reports every attempt through an injected
//! [`TelemetryClient`].

pub mod config;
pub mod products;
pub mod telemetry;

pub use config::AppConfig;
pub use products::{FetchError, FetchState, Product, ProductsController};
pub use telemetry::TelemetryClient;
