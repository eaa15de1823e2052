//! Product list retrieval and its observable state.

pub mod controller;
pub mod error;
pub mod model;
pub mod state;

pub use controller::ProductsController;
pub use error::FetchError;
pub use model::Product;
pub use state::{FetchState, InFlight, ProductStore};
