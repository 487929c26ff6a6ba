//! Devhub Background Worker
//!
//! Handles scheduled jobs:
//! - Region reconciliation for paid apps (every 15 minutes)
//! - Health check heartbeat (every 5 minutes)
//!
//! The worker holds no state of its own; it drives the API server's
//! internal reconcile endpoint so that a catalog change ("region lost
//! payment support") propagates to every paid app on a schedule instead
//! of per-request.

use devhub_monetization::ReconcileSummary;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Worker configuration from the environment.
#[derive(Debug, Clone)]
struct WorkerConfig {
    /// Base URL of the API server.
    api_url: String,
}

impl WorkerConfig {
    fn from_env() -> Self {
        Self {
            api_url: std::env::var("DEVHUB_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
        }
    }
}

async fn trigger_reconcile(client: &reqwest::Client, api_url: &str) {
    let url = format!("{api_url}/internal/reconcile");
    match client.post(&url).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<ReconcileSummary>().await {
                Ok(summary) => info!(
                    apps_checked = summary.apps_checked,
                    apps_adjusted = summary.apps_adjusted,
                    regions_transferred = summary.regions_transferred,
                    "reconcile cycle complete"
                ),
                Err(e) => error!(error = %e, "failed to parse reconcile summary"),
            }
        }
        Ok(response) => {
            error!(status = %response.status(), "reconcile endpoint returned an error");
        }
        Err(e) => {
            error!(error = %e, "failed to reach reconcile endpoint");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    info!("Starting Devhub Worker");
    let config = WorkerConfig::from_env();
    let client = reqwest::Client::new();

    let scheduler = JobScheduler::new().await?;

    // Job 1: Region reconciliation every 15 minutes
    let reconcile_client = client.clone();
    let reconcile_url = config.api_url.clone();
    scheduler
        .add(Job::new_async("0 */15 * * * *", move |_uuid, _l| {
            let client = reconcile_client.clone();
            let url = reconcile_url.clone();
            Box::pin(async move {
                info!("Running scheduled region reconciliation");
                trigger_reconcile(&client, &url).await;
            })
        })?)
        .await?;
    info!("Scheduled: Region reconciliation (every 15 minutes)");

    // Job 2: Health check heartbeat (every 5 minutes)
    scheduler
        .add(Job::new_async("0 */5 * * * *", |_uuid, _l| {
            Box::pin(async move {
                info!("Worker heartbeat - all systems operational");
            })
        })?)
        .await?;
    info!("Scheduled: Health check heartbeat (every 5 minutes)");

    scheduler.start().await?;

    // Keep the process alive; the scheduler runs in the background.
    tokio::signal::ctrl_c().await?;
    info!("Shutting down Devhub Worker");
    Ok(())
}
