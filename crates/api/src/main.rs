// API server clippy configuration
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Devhub API Server
//!
//! HTTP surface for the developer console's monetization pages: app
//! views, tier/region/upsell/payment-account intents, and the internal
//! reconciliation trigger.

mod config;
mod error;
mod routes;
mod state;

use std::time::Duration;

use tokio::time::interval;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::routes::create_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,devhub_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Devhub API Server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let state = AppState::new();

    // Optional in-process reconcile timer; deployments with the worker
    // leave this at 0 and drive the pass over /internal/reconcile.
    if config.reconcile_interval_secs > 0 {
        let service = state.monetization.clone();
        let period = Duration::from_secs(config.reconcile_interval_secs);
        tokio::spawn(async move {
            let mut ticker = interval(period);
            // first tick completes immediately; skip it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let summary = service.reconcile.run().await;
                tracing::info!(
                    apps_adjusted = summary.apps_adjusted,
                    "scheduled reconcile finished"
                );
            }
        });
        tracing::info!(
            interval_secs = config.reconcile_interval_secs,
            "in-process reconcile timer enabled"
        );
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
