//! Tier transitions: the only way an app moves between FREE and PAID.

use std::collections::BTreeSet;
use std::sync::Arc;

use devhub_shared::{AppId, RegionId, Tier};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::app::AppStore;
use crate::catalog::RegionCatalog;
use crate::config;
use crate::error::{MonetizationResult, TransitionError};
use crate::events::{ConsoleEvent, EventSink};
use crate::regions::payment_filter;
use crate::registry::PaymentAccountRegistry;

/// Read snapshots of the reference data a request was validated against.
///
/// Handlers capture these once per request; the engine re-checks the
/// versions at commit time and rejects the whole edit if either moved.
#[derive(Debug, Clone)]
pub struct Snapshots {
    pub catalog: RegionCatalog,
    pub registry: PaymentAccountRegistry,
}

/// What a successful tier change did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedChange {
    pub app: AppId,
    pub from: Tier,
    pub to: Tier,
    /// Regions dropped from the selection because they cannot carry paid
    /// listings. Always empty on a move to FREE.
    pub excluded_for_payment: BTreeSet<RegionId>,
    /// The app goes back through review after any tier change.
    pub pending_review: bool,
    pub message: String,
}

/// Validates and applies tier changes.
#[derive(Clone)]
pub struct TierTransitionEngine {
    store: AppStore,
    catalog: Arc<RwLock<RegionCatalog>>,
    registry: Arc<RwLock<PaymentAccountRegistry>>,
    events: Arc<dyn EventSink>,
}

impl TierTransitionEngine {
    pub fn new(
        store: AppStore,
        catalog: Arc<RwLock<RegionCatalog>>,
        registry: Arc<RwLock<PaymentAccountRegistry>>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            catalog,
            registry,
            events,
        }
    }

    /// Change an app's tier.
    ///
    /// Requesting the current tier is `NoChange`, never a silent success.
    /// FREE→PAID requires the platform set to satisfy the paid-mode policy
    /// and drops payment-unsupported regions from the selection. PAID→FREE
    /// clears price, in-app flag and payment account but keeps `upsell_of`
    /// and does not re-add previously dropped regions.
    pub async fn request_tier_change(
        &self,
        app_id: AppId,
        target: Tier,
        snapshots: &Snapshots,
    ) -> MonetizationResult<AppliedChange> {
        let entry = self.store.entry(app_id).await?;
        let mut app = entry.write().await;

        // Staleness is judged under the app's write lock: a catalog or
        // registry change while we waited for the lock fails the edit.
        self.ensure_fresh(snapshots).await?;

        if app.config.tier == target {
            return Err(TransitionError::NoChange.into());
        }
        let from = app.config.tier;

        let excluded_for_payment = match target {
            Tier::Paid => {
                if !config::paid_policy_satisfied(&app.config.free_platforms) {
                    return Err(TransitionError::PlatformIneligible.into());
                }
                app.config.paid_platforms = std::mem::take(&mut app.config.free_platforms);
                app.config.tier = Tier::Paid;

                let (kept, dropped) = payment_filter(&app.regions.regions, &snapshots.catalog);
                app.regions.regions = kept;
                dropped
            }
            Tier::Free => {
                app.config.free_platforms = std::mem::take(&mut app.config.paid_platforms);
                app.config.tier = Tier::Free;
                app.config.price = None;
                app.config.allow_inapp = false;
                app.config.payment_account = None;
                // upsell_of stays: inert while FREE, picked back up if the
                // app ever returns to PAID.
                BTreeSet::new()
            }
        };

        app.pending_review = true;
        drop(app);

        self.events.publish(ConsoleEvent::ReviewRequested {
            app: app_id,
            from,
            to: target,
        });
        if !excluded_for_payment.is_empty() {
            self.events.publish(ConsoleEvent::RegionsTransferred {
                app: app_id,
                excluded_for_payment: excluded_for_payment.clone(),
            });
        }
        tracing::info!(app_id = %app_id, from = %from, to = %target, "tier changed");

        let message = if excluded_for_payment.is_empty() {
            format!("tier changed from {from} to {target}; app is pending re-review")
        } else {
            format!(
                "tier changed from {from} to {target}; {} region(s) without payment \
                 support were removed from your selection",
                excluded_for_payment.len()
            )
        };

        Ok(AppliedChange {
            app: app_id,
            from,
            to: target,
            excluded_for_payment,
            pending_review: true,
            message,
        })
    }

    /// Reject the edit outright if the reference data moved since the
    /// caller captured its snapshots.
    async fn ensure_fresh(&self, snapshots: &Snapshots) -> MonetizationResult<()> {
        let catalog_fresh = self.catalog.read().await.version() == snapshots.catalog.version();
        let registry_fresh = self.registry.read().await.version() == snapshots.registry.version();
        if !catalog_fresh || !registry_fresh {
            return Err(TransitionError::StaleSnapshot.into());
        }
        Ok(())
    }
}
