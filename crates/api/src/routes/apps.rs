//! App monetization endpoints: views and edit intents.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use devhub_monetization::{
    choices, validator, App, AppliedChange, MonetizationConfig, PlatformChoice, RegionSelection,
    RegionUpdate, TierChoices,
};
use devhub_shared::{AppId, DeveloperId, PaymentAccountId, Platform, RegionId, Tier};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Everything the console needs to render the monetization pages.
#[derive(Debug, Serialize)]
pub struct MonetizationView {
    pub app: AppId,
    pub name: String,
    pub config: MonetizationConfig,
    pub regions: RegionSelection,
    pub complete: bool,
    pub missing_requirements: Vec<validator::MissingItem>,
    pub tier_choices: TierChoices,
    pub platform_choices: Vec<PlatformChoice>,
    pub pending_review: bool,
}

impl MonetizationView {
    fn from_app(app: &App) -> Self {
        Self {
            app: app.id,
            name: app.name.clone(),
            config: app.config.clone(),
            regions: app.regions.clone(),
            complete: validator::is_complete(app),
            missing_requirements: validator::missing_requirements(app),
            tier_choices: choices::tier_choices(app),
            platform_choices: choices::platform_choices(app),
            pending_review: app.pending_review,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAppRequest {
    pub developer: DeveloperId,
    pub name: String,
    #[serde(default)]
    pub platforms: BTreeSet<Platform>,
}

pub async fn create_app(
    State(state): State<AppState>,
    Json(req): Json<CreateAppRequest>,
) -> (StatusCode, Json<MonetizationView>) {
    let app = state
        .monetization
        .create_app(req.developer, req.name, req.platforms)
        .await;
    (StatusCode::CREATED, Json(MonetizationView::from_app(&app)))
}

pub async fn monetization_view(
    State(state): State<AppState>,
    Path(id): Path<AppId>,
) -> Result<Json<MonetizationView>, ApiError> {
    let app = state.monetization.store.snapshot(id).await?;
    Ok(Json(MonetizationView::from_app(&app)))
}

#[derive(Debug, Deserialize)]
pub struct TierChangeRequest {
    pub tier: Tier,
}

pub async fn change_tier(
    State(state): State<AppState>,
    Path(id): Path<AppId>,
    Json(req): Json<TierChangeRequest>,
) -> Result<Json<AppliedChange>, ApiError> {
    let snapshots = state.monetization.snapshots().await;
    let change = state
        .monetization
        .transitions
        .request_tier_change(id, req.tier, &snapshots)
        .await?;
    Ok(Json(change))
}

/// Shortcut selections for the region picker's "all"/"none" buttons.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSelectMode {
    All,
    None,
}

#[derive(Debug, Deserialize)]
pub struct RegionsRequest {
    /// When present, wins over the explicit region list.
    #[serde(default)]
    pub select: Option<RegionSelectMode>,
    #[serde(default)]
    pub regions: BTreeSet<RegionId>,
    #[serde(default)]
    pub include_worldwide: bool,
}

pub async fn set_regions(
    State(state): State<AppState>,
    Path(id): Path<AppId>,
    Json(req): Json<RegionsRequest>,
) -> Result<Json<RegionUpdate>, ApiError> {
    let service = &state.monetization.regions;
    let update = match req.select {
        Some(RegionSelectMode::All) => service.select_all(id).await?,
        Some(RegionSelectMode::None) => service.select_none(id).await?,
        None => {
            service
                .set_regions(id, req.regions, req.include_worldwide)
                .await?
        }
    };
    Ok(Json(update))
}

#[derive(Debug, Deserialize)]
pub struct UpsellRequest {
    /// The free counterpart to promote; null clears the link.
    pub free_app: Option<AppId>,
}

pub async fn set_upsell(
    State(state): State<AppState>,
    Path(id): Path<AppId>,
    Json(req): Json<UpsellRequest>,
) -> Result<StatusCode, ApiError> {
    state.monetization.upsell.set_upsell(id, req.free_app).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct BindAccountRequest {
    /// The payment account to bind; null unbinds.
    pub account: Option<PaymentAccountId>,
}

pub async fn bind_account(
    State(state): State<AppState>,
    Path(id): Path<AppId>,
    Json(req): Json<BindAccountRequest>,
) -> Result<StatusCode, ApiError> {
    let snapshots = state.monetization.snapshots().await;
    state
        .monetization
        .accounts
        .bind_account(id, req.account, &snapshots.registry)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
