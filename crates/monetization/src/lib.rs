// Monetization crate clippy configuration
// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Devhub Monetization Core
//!
//! The configuration state machine behind the developer console's
//! monetization pages: tier selection, payment account binding, and
//! regional availability.
//!
//! ## Features
//!
//! - **Tier Transitions**: validated FREE↔PAID moves with re-review side
//!   effects
//! - **Completeness**: pure checks gating publication (price, payment
//!   account, platform)
//! - **Region Rules**: payment-availability filtering with the
//!   "we transferred your choices" adjustment report
//! - **Upsell Links**: paid app promoting its free counterpart
//! - **Reconciliation**: scheduled batch pass re-applying the region
//!   filter after catalog changes
//!
//! The presentation layer only reads state and enumerated choices and
//! writes back intents; markup, auth and payment processing live outside
//! this crate.

pub mod accounts;
pub mod app;
pub mod catalog;
pub mod choices;
pub mod config;
pub mod error;
pub mod events;
pub mod reconcile;
pub mod regions;
pub mod registry;
pub mod transitions;
pub mod upsell;
pub mod validator;


// Accounts
pub use accounts::AccountService;

// App store
pub use app::{App, AppStore};

// Catalog
pub use catalog::{RegionCatalog, RegionInfo};

// Choices
pub use choices::{HiddenTier, PlatformChoice, TierChoice, TierChoices};

// Config
pub use config::MonetizationConfig;

// Error
pub use error::{
    BindError, MonetizationError, MonetizationResult, RegionError, TransitionError, UpsellError,
};

// Events
pub use events::{ConsoleEvent, EventSink, MemorySink, TracingSink};

// Reconcile
pub use reconcile::{ReconcileService, ReconcileSummary};

// Regions
pub use regions::{RegionSelection, RegionService, RegionUpdate};

// Registry
pub use registry::{PaymentAccount, PaymentAccountRegistry};

// Transitions
pub use transitions::{AppliedChange, Snapshots, TierTransitionEngine};

// Upsell
pub use upsell::UpsellService;

// Validator
pub use validator::MissingItem;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Main monetization service that combines all console functionality.
pub struct MonetizationService {
    pub store: AppStore,
    pub catalog: Arc<RwLock<RegionCatalog>>,
    pub registry: Arc<RwLock<PaymentAccountRegistry>>,
    pub events: Arc<dyn EventSink>,
    pub transitions: TierTransitionEngine,
    pub regions: RegionService,
    pub upsell: UpsellService,
    pub accounts: AccountService,
    pub reconcile: ReconcileService,
}

impl MonetizationService {
    /// Create a service over fresh state with the given reference data.
    pub fn new(
        catalog: RegionCatalog,
        registry: PaymentAccountRegistry,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let store = AppStore::new();
        let catalog = Arc::new(RwLock::new(catalog));
        let registry = Arc::new(RwLock::new(registry));

        Self {
            transitions: TierTransitionEngine::new(
                store.clone(),
                catalog.clone(),
                registry.clone(),
                events.clone(),
            ),
            regions: RegionService::new(store.clone(), catalog.clone()),
            upsell: UpsellService::new(store.clone()),
            accounts: AccountService::new(store.clone(), registry.clone()),
            reconcile: ReconcileService::new(store.clone(), catalog.clone(), events.clone()),
            store,
            catalog,
            registry,
            events,
        }
    }

    /// Service over the stock region catalog, logging events via `tracing`.
    pub fn with_seed_catalog() -> Self {
        Self::new(
            RegionCatalog::seed(),
            PaymentAccountRegistry::new(),
            Arc::new(TracingSink),
        )
    }

    /// Capture the reference-data snapshots for one edit request.
    pub async fn snapshots(&self) -> Snapshots {
        Snapshots {
            catalog: self.catalog.read().await.clone(),
            registry: self.registry.read().await.clone(),
        }
    }

    /// Create an app owned by `developer`, defaulting to FREE with the
    /// catalog's default region selection.
    pub async fn create_app(
        &self,
        developer: devhub_shared::DeveloperId,
        name: impl Into<String>,
        platforms: std::collections::BTreeSet<devhub_shared::Platform>,
    ) -> App {
        let app = {
            let catalog = self.catalog.read().await;
            App::new(developer, name, platforms, &catalog)
        };
        let snapshot = app.clone();
        self.store.insert(app).await;
        tracing::info!(app_id = %snapshot.id, "app created");
        snapshot
    }
}
