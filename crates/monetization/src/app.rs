//! The app aggregate and the in-memory store that serializes edits.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use devhub_shared::{AppId, DeveloperId, Platform};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::catalog::RegionCatalog;
use crate::config::MonetizationConfig;
use crate::error::{MonetizationError, MonetizationResult};
use crate::regions::RegionSelection;

/// An app together with the monetization state it owns. The config and the
/// region selection are created with the app and only die with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: AppId,
    pub developer: DeveloperId,
    pub name: String,
    pub config: MonetizationConfig,
    pub regions: RegionSelection,
    /// Set on every successful tier change; cleared by the review pipeline,
    /// which lives outside this crate.
    pub pending_review: bool,
    pub created_at: OffsetDateTime,
}

impl App {
    /// A new app defaults to FREE with every worldwide-member region selected.
    pub fn new(
        developer: DeveloperId,
        name: impl Into<String>,
        platforms: BTreeSet<Platform>,
        catalog: &RegionCatalog,
    ) -> Self {
        Self {
            id: AppId::new(),
            developer,
            name: name.into(),
            config: MonetizationConfig {
                free_platforms: platforms,
                ..Default::default()
            },
            regions: RegionSelection::default_for(catalog),
            pending_review: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// In-memory app store with single-writer-per-app semantics.
///
/// Each app sits behind its own `RwLock`: writers to one app serialize on
/// its write lock while reads (and edits to other apps) proceed freely.
#[derive(Clone, Default)]
pub struct AppStore {
    inner: Arc<RwLock<HashMap<AppId, Arc<RwLock<App>>>>>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, app: App) -> AppId {
        let id = app.id;
        self.inner
            .write()
            .await
            .insert(id, Arc::new(RwLock::new(app)));
        id
    }

    /// The lockable entry for an app; callers take the read or write lock
    /// depending on intent.
    pub async fn entry(&self, id: AppId) -> MonetizationResult<Arc<RwLock<App>>> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(MonetizationError::AppNotFound(id))
    }

    /// A point-in-time copy of an app.
    pub async fn snapshot(&self, id: AppId) -> MonetizationResult<App> {
        let entry = self.entry(id).await?;
        let app = entry.read().await;
        Ok(app.clone())
    }

    pub async fn ids(&self) -> Vec<AppId> {
        self.inner.read().await.keys().copied().collect()
    }

    /// Exclusive guard over the whole map. Holding it keeps inserts and
    /// other store-wide operations from interleaving with a check-and-set
    /// that spans multiple apps; holders may still take individual app
    /// locks underneath.
    pub(crate) async fn write_guard(
        &self,
    ) -> tokio::sync::RwLockWriteGuard<'_, HashMap<AppId, Arc<RwLock<App>>>> {
        self.inner.write().await
    }
}
