//! Completeness checks that gate publication.
//!
//! Pure functions over an app snapshot: safe to call on every render, and
//! callers must re-evaluate after any mutation to the config, the region
//! selection, or the payment registry. An incomplete app is advisory
//! state, not an error; listing policy is enforced elsewhere.

use devhub_shared::Tier;
use serde::Serialize;

use crate::app::App;
use crate::config;

/// A requirement currently blocking completeness, in remediation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItem {
    /// PAID apps need a price point.
    Price,
    /// PAID apps need a bound payment account.
    PaymentAccount,
    /// At least one (paid-eligible, for PAID) platform must be selected.
    Platform,
}

impl std::fmt::Display for MissingItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MissingItem::Price => "price",
            MissingItem::PaymentAccount => "payment account",
            MissingItem::Platform => "platform",
        };
        f.write_str(s)
    }
}

/// Everything still blocking this app's completeness, in the fixed
/// priority order price, payment account, platform.
pub fn missing_requirements(app: &App) -> Vec<MissingItem> {
    let mut missing = Vec::new();
    match app.config.tier {
        Tier::Free => {
            if app.config.free_platforms.is_empty() {
                missing.push(MissingItem::Platform);
            }
        }
        Tier::Paid => {
            if app.config.price.is_none() {
                missing.push(MissingItem::Price);
            }
            if app.config.payment_account.is_none() {
                missing.push(MissingItem::PaymentAccount);
            }
            if app.config.paid_platforms.is_empty()
                || !config::paid_policy_satisfied(&app.config.paid_platforms)
            {
                missing.push(MissingItem::Platform);
            }
        }
    }
    missing
}

/// Whether the app's monetization config satisfies every publication
/// requirement for its tier.
pub fn is_complete(app: &App) -> bool {
    missing_requirements(app).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RegionCatalog;
    use devhub_shared::{DeveloperId, PaymentAccountId, Platform, PriceTierId};

    fn free_app(platforms: &[Platform]) -> App {
        App::new(
            DeveloperId::new(),
            "Notes",
            platforms.iter().copied().collect(),
            &RegionCatalog::seed(),
        )
    }

    fn paid_app() -> App {
        let mut app = free_app(&[Platform::FirefoxOs]);
        app.config.tier = Tier::Paid;
        app.config.paid_platforms = std::mem::take(&mut app.config.free_platforms);
        app
    }

    #[test]
    fn free_app_needs_a_platform() {
        assert!(!is_complete(&free_app(&[])));
        assert_eq!(missing_requirements(&free_app(&[])), [MissingItem::Platform]);
        assert!(is_complete(&free_app(&[Platform::Desktop])));
    }

    #[test]
    fn paid_app_missing_everything_reports_fixed_order() {
        let mut app = paid_app();
        app.config.paid_platforms.clear();
        assert_eq!(
            missing_requirements(&app),
            [
                MissingItem::Price,
                MissingItem::PaymentAccount,
                MissingItem::Platform
            ]
        );
    }

    #[test]
    fn paid_app_without_account_is_never_complete() {
        let mut app = paid_app();
        app.config.price = Some(PriceTierId(10));
        assert!(!is_complete(&app));
        assert_eq!(missing_requirements(&app), [MissingItem::PaymentAccount]);

        app.config.payment_account = Some(PaymentAccountId::new());
        assert!(is_complete(&app));
    }
}
