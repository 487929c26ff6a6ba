//! Outbound events for external collaborators.
//!
//! The core never talks to the reviewer queue or the notification system
//! directly; it publishes events through an [`EventSink`] and the embedding
//! process decides where they go.

use std::collections::BTreeSet;
use std::sync::Mutex;

use devhub_shared::{AppId, RegionId, Tier};
use serde::Serialize;

/// Something that happened in the monetization core that external systems
/// need to hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    /// A tier change succeeded; the app goes back into the review queue.
    ReviewRequested {
        app: AppId,
        from: Tier,
        to: Tier,
    },
    /// Regions were removed from an app's selection because they cannot
    /// carry paid listings ("we transferred your choices").
    RegionsTransferred {
        app: AppId,
        excluded_for_payment: BTreeSet<RegionId>,
    },
}

/// Destination for [`ConsoleEvent`]s.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: ConsoleEvent);
}

/// Production sink: structured log lines picked up by the event shipper.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: ConsoleEvent) {
        match &event {
            ConsoleEvent::ReviewRequested { app, from, to } => {
                tracing::info!(app_id = %app, from = %from, to = %to, "review requested");
            }
            ConsoleEvent::RegionsTransferred {
                app,
                excluded_for_payment,
            } => {
                tracing::info!(
                    app_id = %app,
                    excluded = excluded_for_payment.len(),
                    "regions transferred"
                );
            }
        }
    }
}

/// In-memory sink for tests and embedders that want to drain events.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ConsoleEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything published so far.
    pub fn take(&self) -> Vec<ConsoleEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: ConsoleEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
