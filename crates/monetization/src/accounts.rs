//! Binding payment accounts to paid apps.

use std::sync::Arc;

use devhub_shared::{AppId, PaymentAccountId, Tier};
use tokio::sync::RwLock;

use crate::app::AppStore;
use crate::error::{BindError, MonetizationResult};
use crate::registry::PaymentAccountRegistry;

/// Applies payment-account bind intents against a registry snapshot.
#[derive(Clone)]
pub struct AccountService {
    store: AppStore,
    registry: Arc<RwLock<PaymentAccountRegistry>>,
}

impl AccountService {
    pub fn new(store: AppStore, registry: Arc<RwLock<PaymentAccountRegistry>>) -> Self {
        Self { store, registry }
    }

    /// Bind a payment account to an app, or unbind with `None`.
    ///
    /// Binding requires a PAID app and an account the app's developer has
    /// actually linked, validated against the caller's registry snapshot
    /// and re-checked against the live registry version at commit.
    /// Unbinding always succeeds.
    pub async fn bind_account(
        &self,
        app_id: AppId,
        account: Option<PaymentAccountId>,
        snapshot: &PaymentAccountRegistry,
    ) -> MonetizationResult<()> {
        let entry = self.store.entry(app_id).await?;
        let mut app = entry.write().await;

        let Some(account_id) = account else {
            app.config.payment_account = None;
            tracing::debug!(app_id = %app_id, "payment account unbound");
            return Ok(());
        };

        if app.config.tier == Tier::Free {
            return Err(BindError::FreeTier.into());
        }
        if !snapshot.contains(app.developer, account_id) {
            return Err(BindError::UnknownAccount(account_id).into());
        }
        if self.registry.read().await.version() != snapshot.version() {
            return Err(BindError::StaleRegistry.into());
        }

        app.config.payment_account = Some(account_id);
        tracing::debug!(app_id = %app_id, account = %account_id, "payment account bound");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::catalog::RegionCatalog;
    use crate::error::MonetizationError;
    use crate::registry::PaymentAccount;
    use devhub_shared::{DeveloperId, Platform};

    async fn fixture(tier: Tier) -> (AccountService, AppId, DeveloperId, PaymentAccountRegistry) {
        let developer = DeveloperId::new();
        let mut registry = PaymentAccountRegistry::new();
        registry.link_account(PaymentAccount {
            id: PaymentAccountId::new(),
            developer,
            name: "Main".to_string(),
            provider: "bango".to_string(),
        });

        let store = AppStore::new();
        let mut app = App::new(
            developer,
            "Game",
            [Platform::FirefoxOs].into(),
            &RegionCatalog::seed(),
        );
        if tier.is_paid() {
            app.config.tier = Tier::Paid;
            app.config.paid_platforms = std::mem::take(&mut app.config.free_platforms);
        }
        let app_id = store.insert(app).await;

        let shared = Arc::new(RwLock::new(registry.clone()));
        (AccountService::new(store, shared), app_id, developer, registry)
    }

    #[tokio::test]
    async fn binds_linked_account_to_paid_app() {
        let (service, app_id, developer, registry) = fixture(Tier::Paid).await;
        let account = registry.accounts_for(developer)[0].id;
        service
            .bind_account(app_id, Some(account), &registry)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn free_apps_cannot_bind_accounts() {
        let (service, app_id, developer, registry) = fixture(Tier::Free).await;
        let account = registry.accounts_for(developer)[0].id;
        let err = service
            .bind_account(app_id, Some(account), &registry)
            .await
            .unwrap_err();
        assert_eq!(err, MonetizationError::Bind(BindError::FreeTier));
    }

    #[tokio::test]
    async fn unknown_account_is_rejected() {
        let (service, app_id, _, registry) = fixture(Tier::Paid).await;
        let bogus = PaymentAccountId::new();
        let err = service
            .bind_account(app_id, Some(bogus), &registry)
            .await
            .unwrap_err();
        assert_eq!(err, MonetizationError::Bind(BindError::UnknownAccount(bogus)));
    }

    #[tokio::test]
    async fn stale_registry_snapshot_is_rejected() {
        let (service, app_id, developer, stale) = fixture(Tier::Paid).await;
        let account = stale.accounts_for(developer)[0].id;

        // registry moves on after the snapshot was taken
        service.registry.write().await.link_account(PaymentAccount {
            id: PaymentAccountId::new(),
            developer,
            name: "Second".to_string(),
            provider: "bango".to_string(),
        });

        let err = service
            .bind_account(app_id, Some(account), &stale)
            .await
            .unwrap_err();
        assert_eq!(err, MonetizationError::Bind(BindError::StaleRegistry));
    }

    #[tokio::test]
    async fn unbind_always_succeeds() {
        let (service, app_id, _, registry) = fixture(Tier::Free).await;
        service.bind_account(app_id, None, &registry).await.unwrap();
    }
}
