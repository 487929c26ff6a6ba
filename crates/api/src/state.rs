//! Application state

use std::sync::Arc;

use devhub_monetization::MonetizationService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub monetization: Arc<MonetizationService>,
}

impl AppState {
    /// State over the stock catalog, publishing events as log lines.
    pub fn new() -> Self {
        Self {
            monetization: Arc::new(MonetizationService::with_seed_catalog()),
        }
    }
}
