use tokio::sync::watch;

use crate::products::model::Product;

/// Observable state of the product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    /// Products in server order, replaced wholesale on each successful fetch
    pub products: Vec<Product>,
    /// True only while an attempt is in flight
    pub loading: bool,
    /// Message of the most recent failed attempt, cleared when a new one starts
    pub error: Option<String>,
}

/// Holds [`FetchState`] and notifies subscribers on every change.
#[derive(Debug)]
pub struct ProductStore {
    tx: watch::Sender<FetchState>,
}

impl ProductStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FetchState::default());
        Self { tx }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FetchState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.tx.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    /// Enter the loading state unless an attempt is already running.
    ///
    /// Check and set happen under the channel's write lock, so two callers
    /// can never both observe `loading == false`. Returns `None`, without
    /// notifying subscribers, when the guard is already held.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        let started = self.tx.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            state.loading = true;
            state.error = None;
            true
        });
        started.then_some(InFlight { store: self })
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

/// An attempt holding the loading flag.
///
/// Dropping it, on completion or because the fetch future was cancelled,
/// clears `loading`.
#[derive(Debug)]
pub struct InFlight<'a> {
    store: &'a ProductStore,
}

impl InFlight<'_> {
    /// Replace the product list
    pub fn store_products(&self, products: Vec<Product>) {
        self.store.tx.send_modify(|state| state.products = products);
    }

    /// Record a failure; the product list is left as it was
    pub fn record_error(&self, message: String) {
        self.store.tx.send_modify(|state| state.error = Some(message));
    }

    /// Leave the loading state
    pub fn finish(self) {}
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.store.tx.send_modify(|state| state.loading = false);
    }
}
