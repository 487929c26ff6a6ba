//! Batch reconciliation of paid apps against the region catalog.
//!
//! When a region loses payment support the change is not pushed through
//! every open edit session; instead this pass re-applies the payment
//! filter to every PAID app's selection on a schedule. It takes each
//! app's write lock, so it is safe to run alongside interactive edits,
//! and it only ever removes regions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::app::AppStore;
use crate::catalog::RegionCatalog;
use crate::events::{ConsoleEvent, EventSink};
use crate::regions::payment_filter;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub checked_at: OffsetDateTime,
    /// PAID apps inspected.
    pub apps_checked: usize,
    /// Apps whose selection lost at least one region.
    pub apps_adjusted: usize,
    /// Total regions removed across all apps.
    pub regions_transferred: usize,
}

/// Runs the periodic catalog reconciliation pass.
#[derive(Clone)]
pub struct ReconcileService {
    store: AppStore,
    catalog: Arc<RwLock<RegionCatalog>>,
    events: Arc<dyn EventSink>,
}

impl ReconcileService {
    pub fn new(
        store: AppStore,
        catalog: Arc<RwLock<RegionCatalog>>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            catalog,
            events,
        }
    }

    /// Re-apply the payment filter to every PAID app.
    ///
    /// Emits a `RegionsTransferred` event per adjusted app. Idempotent:
    /// a second pass against the same catalog adjusts nothing.
    pub async fn run(&self) -> ReconcileSummary {
        let catalog = self.catalog.read().await.clone();
        let ids = self.store.ids().await;

        let mut apps_checked = 0;
        let mut apps_adjusted = 0;
        let mut regions_transferred = 0;

        for id in ids {
            // App may have been removed since we listed ids.
            let Ok(entry) = self.store.entry(id).await else {
                continue;
            };
            let mut app = entry.write().await;
            if !app.config.tier.is_paid() {
                continue;
            }
            apps_checked += 1;

            let (kept, dropped) = payment_filter(&app.regions.regions, &catalog);
            if dropped.is_empty() {
                continue;
            }

            app.regions.regions = kept;
            drop(app);

            apps_adjusted += 1;
            regions_transferred += dropped.len();
            tracing::info!(
                app_id = %id,
                excluded = dropped.len(),
                "reconcile removed payment-unsupported regions"
            );
            self.events.publish(ConsoleEvent::RegionsTransferred {
                app: id,
                excluded_for_payment: dropped,
            });
        }

        let summary = ReconcileSummary {
            checked_at: OffsetDateTime::now_utc(),
            apps_checked,
            apps_adjusted,
            regions_transferred,
        };
        tracing::info!(
            apps_checked = summary.apps_checked,
            apps_adjusted = summary.apps_adjusted,
            regions_transferred = summary.regions_transferred,
            "reconcile pass complete"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::events::MemorySink;
    use devhub_shared::{DeveloperId, Platform, RegionId, Tier};

    struct Fixture {
        store: AppStore,
        catalog: Arc<RwLock<RegionCatalog>>,
        sink: Arc<MemorySink>,
        service: ReconcileService,
    }

    fn fixture() -> Fixture {
        let store = AppStore::new();
        let catalog = Arc::new(RwLock::new(RegionCatalog::seed()));
        let sink = Arc::new(MemorySink::new());
        let service = ReconcileService::new(store.clone(), catalog.clone(), sink.clone());
        Fixture {
            store,
            catalog,
            sink,
            service,
        }
    }

    async fn paid_app(fx: &Fixture) -> devhub_shared::AppId {
        let catalog = fx.catalog.read().await.clone();
        let mut app = App::new(
            DeveloperId::new(),
            "Game",
            [Platform::FirefoxOs].into(),
            &catalog,
        );
        app.config.tier = Tier::Paid;
        app.config.paid_platforms = std::mem::take(&mut app.config.free_platforms);
        let (kept, _) = payment_filter(&app.regions.regions, &catalog);
        app.regions.regions = kept;
        fx.store.insert(app).await
    }

    #[tokio::test]
    async fn removes_regions_that_lost_payment_support() {
        let fx = fixture();
        let id = paid_app(&fx).await;
        assert!(fx
            .store
            .snapshot(id)
            .await
            .unwrap()
            .regions
            .regions
            .contains(&RegionId::new("br")));

        fx.catalog
            .write()
            .await
            .set_payment_supported(&RegionId::new("br"), false);

        let summary = fx.service.run().await;
        assert_eq!(summary.apps_checked, 1);
        assert_eq!(summary.apps_adjusted, 1);
        assert_eq!(summary.regions_transferred, 1);

        let app = fx.store.snapshot(id).await.unwrap();
        assert!(!app.regions.regions.contains(&RegionId::new("br")));

        let events = fx.sink.take();
        assert_eq!(
            events,
            vec![ConsoleEvent::RegionsTransferred {
                app: id,
                excluded_for_payment: [RegionId::new("br")].into(),
            }]
        );
    }

    #[tokio::test]
    async fn second_pass_is_a_no_op() {
        let fx = fixture();
        paid_app(&fx).await;
        fx.catalog
            .write()
            .await
            .set_payment_supported(&RegionId::new("br"), false);

        fx.service.run().await;
        let second = fx.service.run().await;
        assert_eq!(second.apps_adjusted, 0);
        assert_eq!(second.regions_transferred, 0);
    }

    #[tokio::test]
    async fn free_apps_are_untouched() {
        let fx = fixture();
        let catalog = fx.catalog.read().await.clone();
        let id = fx
            .store
            .insert(App::new(
                DeveloperId::new(),
                "Free",
                [Platform::Desktop].into(),
                &catalog,
            ))
            .await;

        fx.catalog
            .write()
            .await
            .set_payment_supported(&RegionId::new("br"), false);
        let summary = fx.service.run().await;

        assert_eq!(summary.apps_checked, 0);
        let app = fx.store.snapshot(id).await.unwrap();
        assert!(app.regions.regions.contains(&RegionId::new("br")));
    }
}
