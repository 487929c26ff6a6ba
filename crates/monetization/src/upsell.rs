//! Upsell linkage: a paid app promoting its free counterpart.

use std::collections::HashMap;
use std::sync::Arc;

use devhub_shared::{AppId, Tier};
use tokio::sync::RwLock;

use crate::app::{App, AppStore};
use crate::error::{MonetizationError, MonetizationResult, UpsellError};

/// Manages the paid-app → free-app upsell link.
#[derive(Clone)]
pub struct UpsellService {
    store: AppStore,
}

impl UpsellService {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Link `paid_app` to promote `free_app`, or clear the link with `None`.
    ///
    /// The target must be a FREE app owned by the same developer and not
    /// already promoted by a different paid app. Clearing never fails
    /// beyond the app lookup.
    pub async fn set_upsell(
        &self,
        paid_app: AppId,
        free_app: Option<AppId>,
    ) -> MonetizationResult<()> {
        let Some(free_id) = free_app else {
            let entry = self.store.entry(paid_app).await?;
            entry.write().await.config.upsell_of = None;
            tracing::debug!(app_id = %paid_app, "upsell link cleared");
            return Ok(());
        };

        // An app can never be both sides of the link.
        if free_id == paid_app {
            return Err(UpsellError::WrongTier.into());
        }

        // The whole check-and-set runs under the store's exclusive guard
        // with both app locks held: no competing link, tier change or
        // insert can slip in between the uniqueness scan and the write.
        let map = self.store.write_guard().await;
        let entry = lookup(&map, paid_app)?;
        let target_entry = lookup(&map, free_id)?;

        let mut app = entry.write().await;
        let target = target_entry.read().await;

        if app.config.tier != Tier::Paid || target.config.tier != Tier::Free {
            return Err(UpsellError::WrongTier.into());
        }
        if target.developer != app.developer {
            return Err(UpsellError::NotOwnedByDeveloper.into());
        }
        for (id, other) in map.iter() {
            if *id == paid_app || *id == free_id {
                continue;
            }
            if other.read().await.config.upsell_of == Some(free_id) {
                return Err(UpsellError::AlreadyLinked.into());
            }
        }

        app.config.upsell_of = Some(free_id);
        tracing::debug!(app_id = %paid_app, free_app = %free_id, "upsell link set");
        Ok(())
    }
}

fn lookup(
    map: &HashMap<AppId, Arc<RwLock<App>>>,
    id: AppId,
) -> MonetizationResult<Arc<RwLock<App>>> {
    map.get(&id)
        .cloned()
        .ok_or(MonetizationError::AppNotFound(id))
}
