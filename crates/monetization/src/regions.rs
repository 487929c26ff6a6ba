//! Region selection and its payment-availability rules.

use std::collections::BTreeSet;
use std::sync::Arc;

use devhub_shared::{AppId, RegionId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::app::AppStore;
use crate::catalog::RegionCatalog;
use crate::error::{MonetizationResult, RegionError};

/// The regions an app is listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelection {
    /// Explicitly enabled regions.
    pub regions: BTreeSet<RegionId>,
    /// Also list in any future or unlisted region.
    pub include_worldwide: bool,
}

impl RegionSelection {
    pub fn default_for(catalog: &RegionCatalog) -> Self {
        Self {
            regions: catalog.default_selection(),
            include_worldwide: true,
        }
    }
}

/// Split a region set into (payment-capable, everything else).
///
/// Regions missing from the catalog count as excluded: a region that was
/// delisted can no longer carry paid listings either.
pub fn payment_filter(
    regions: &BTreeSet<RegionId>,
    catalog: &RegionCatalog,
) -> (BTreeSet<RegionId>, BTreeSet<RegionId>) {
    regions
        .iter()
        .cloned()
        .partition(|id| catalog.payment_supported(id))
}

/// Outcome of a region-selection edit. Exclusions are an adjustment, not
/// an error: the caller shows the "we transferred your choices" notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionUpdate {
    pub regions: BTreeSet<RegionId>,
    pub include_worldwide: bool,
    pub excluded_for_payment: BTreeSet<RegionId>,
}

/// Applies region-selection intents against the catalog.
#[derive(Clone)]
pub struct RegionService {
    store: AppStore,
    catalog: Arc<RwLock<RegionCatalog>>,
}

impl RegionService {
    pub fn new(store: AppStore, catalog: Arc<RwLock<RegionCatalog>>) -> Self {
        Self { store, catalog }
    }

    /// Replace an app's region selection.
    ///
    /// Unknown region ids are a hard failure. Payment-unsupported regions
    /// on a PAID app are silently dropped from the accepted set and
    /// reported back via `excluded_for_payment`.
    pub async fn set_regions(
        &self,
        app_id: AppId,
        requested: BTreeSet<RegionId>,
        include_worldwide: bool,
    ) -> MonetizationResult<RegionUpdate> {
        let catalog = self.catalog.read().await.clone();
        for region in &requested {
            if !catalog.contains(region) {
                return Err(RegionError::InvalidRegionId(region.clone()).into());
            }
        }

        let entry = self.store.entry(app_id).await?;
        let mut app = entry.write().await;

        let (accepted, excluded_for_payment) = if app.config.tier.is_paid() {
            payment_filter(&requested, &catalog)
        } else {
            (requested, BTreeSet::new())
        };

        app.regions.regions = accepted.clone();
        app.regions.include_worldwide = include_worldwide;

        if !excluded_for_payment.is_empty() {
            tracing::debug!(
                app_id = %app_id,
                excluded = excluded_for_payment.len(),
                "payment-unsupported regions dropped from selection"
            );
        }

        Ok(RegionUpdate {
            regions: accepted,
            include_worldwide,
            excluded_for_payment,
        })
    }

    /// Select every catalog region (PAID apps still get the payment filter).
    pub async fn select_all(&self, app_id: AppId) -> MonetizationResult<RegionUpdate> {
        let all = self.catalog.read().await.region_ids();
        self.set_regions(app_id, all, true).await
    }

    /// Clear the selection entirely.
    pub async fn select_none(&self, app_id: AppId) -> MonetizationResult<RegionUpdate> {
        self.set_regions(app_id, BTreeSet::new(), false).await
    }
}
