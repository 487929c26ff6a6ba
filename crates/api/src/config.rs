//! Server configuration from the environment.

use std::net::SocketAddr;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener on.
    pub bind_addr: SocketAddr,
    /// In-process reconcile interval in seconds; 0 disables the internal
    /// timer (the worker drives reconciliation over HTTP instead).
    pub reconcile_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;
        let reconcile_interval_secs = std::env::var("RECONCILE_INTERVAL_SECS")
            .ok()
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(0);
        Ok(Self {
            bind_addr,
            reconcile_interval_secs,
        })
    }
}
