//! Error taxonomy for monetization edits.
//!
//! Every variant is recoverable and meant to be shown to the developer;
//! nothing here is fatal to the process. Region auto-exclusion is *not* an
//! error — it is reported as an adjustment on the result types.

use devhub_shared::{AppId, PaymentAccountId, RegionId};
use thiserror::Error;

/// Failures of a tier-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The app is already on the requested tier. Callers should treat this
    /// as non-fatal; nothing was changed.
    #[error("app is already on the requested tier")]
    NoChange,
    /// The app's platform set is not allowed to run in paid mode.
    #[error("app platforms are not eligible for paid mode")]
    PlatformIneligible,
    /// The catalog or payment registry changed between snapshot and commit.
    #[error("reference data changed while editing; re-fetch and retry")]
    StaleSnapshot,
}

/// Failures of a region-selection request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// A requested region does not exist in the catalog.
    #[error("unknown region: {0}")]
    InvalidRegionId(RegionId),
}

/// Failures of an upsell-link request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UpsellError {
    /// The free counterpart belongs to a different developer.
    #[error("the linked free app belongs to a different developer")]
    NotOwnedByDeveloper,
    /// Upsell links run from a paid app to a free app only.
    #[error("upsell links require a paid app promoting a free app")]
    WrongTier,
    /// The free app is already promoted by another paid app.
    #[error("the free app is already the upsell target of another paid app")]
    AlreadyLinked,
}

/// Failures of a payment-account bind request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindError {
    /// Free apps cannot have payment accounts.
    #[error("free apps cannot have payment accounts")]
    FreeTier,
    /// The account is not linked to the app's developer.
    #[error("payment account {0} is not linked to this developer")]
    UnknownAccount(PaymentAccountId),
    /// The payment registry changed between snapshot and commit.
    #[error("payment accounts changed while editing; re-fetch and retry")]
    StaleRegistry,
}

/// Umbrella error returned by the services in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonetizationError {
    #[error("app {0} not found")]
    AppNotFound(AppId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error(transparent)]
    Upsell(#[from] UpsellError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

pub type MonetizationResult<T> = Result<T, MonetizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_variants_keep_inner_message() {
        let err: MonetizationError = TransitionError::NoChange.into();
        assert_eq!(err.to_string(), TransitionError::NoChange.to_string());

        let err: MonetizationError = UpsellError::AlreadyLinked.into();
        assert!(err.to_string().contains("already the upsell target"));
    }
}
