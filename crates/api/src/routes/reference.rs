//! Reference-data endpoints: region catalog, payment accounts, and the
//! internal reconciliation trigger the worker calls.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use devhub_monetization::{PaymentAccount, ReconcileSummary};
use devhub_shared::{DeveloperId, PaymentAccountId, RegionId};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// One row of the region picker.
#[derive(Debug, Serialize)]
pub struct RegionView {
    pub id: RegionId,
    pub name: String,
    pub payment_supported: bool,
    pub in_worldwide: bool,
}

pub async fn list_regions(State(state): State<AppState>) -> Json<Vec<RegionView>> {
    let catalog = state.monetization.catalog.read().await;
    let regions = catalog
        .iter()
        .map(|(id, info)| RegionView {
            id: id.clone(),
            name: info.name.clone(),
            payment_supported: info.payment_supported,
            in_worldwide: info.in_worldwide,
        })
        .collect();
    Json(regions)
}

#[derive(Debug, Deserialize)]
pub struct LinkAccountRequest {
    pub developer: DeveloperId,
    pub name: String,
    pub provider: String,
}

/// Record a payment account the developer linked with the provider.
pub async fn link_payment_account(
    State(state): State<AppState>,
    Json(req): Json<LinkAccountRequest>,
) -> (StatusCode, Json<PaymentAccount>) {
    let account = PaymentAccount {
        id: PaymentAccountId::new(),
        developer: req.developer,
        name: req.name,
        provider: req.provider,
    };
    state
        .monetization
        .registry
        .write()
        .await
        .link_account(account.clone());
    tracing::info!(developer = %account.developer, "payment account linked");
    (StatusCode::CREATED, Json(account))
}

/// Run the region reconciliation pass. Called by the worker on a schedule;
/// also available for operators.
pub async fn run_reconcile(State(state): State<AppState>) -> Json<ReconcileSummary> {
    Json(state.monetization.reconcile.run().await)
}
