//! The monetization configuration attached to every app.

use std::collections::BTreeSet;

use devhub_shared::{AppId, PaymentAccountId, Platform, PriceTierId, Tier};
use serde::{Deserialize, Serialize};

/// Monetization settings for one app.
///
/// `free_platforms` and `paid_platforms` are both kept so that a round trip
/// through PAID and back does not lose the developer's platform picks; only
/// the set matching the current tier is "active".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetizationConfig {
    pub tier: Tier,
    pub free_platforms: BTreeSet<Platform>,
    pub paid_platforms: BTreeSet<Platform>,
    /// Price point, required for a PAID config to be complete.
    pub price: Option<PriceTierId>,
    /// Whether the app uses in-app payments.
    pub allow_inapp: bool,
    /// The free counterpart this paid app promotes. Survives a move back
    /// to FREE (inert but informational).
    pub upsell_of: Option<AppId>,
    /// Bound payment account, required for a PAID config to be complete.
    pub payment_account: Option<PaymentAccountId>,
}

impl Default for MonetizationConfig {
    fn default() -> Self {
        Self {
            tier: Tier::Free,
            free_platforms: BTreeSet::new(),
            paid_platforms: BTreeSet::new(),
            price: None,
            allow_inapp: false,
            upsell_of: None,
            payment_account: None,
        }
    }
}

impl MonetizationConfig {
    /// The platform set that matters for the current tier.
    pub fn active_platforms(&self) -> &BTreeSet<Platform> {
        match self.tier {
            Tier::Free => &self.free_platforms,
            Tier::Paid => &self.paid_platforms,
        }
    }
}

/// Whether a platform set is allowed to run in paid mode.
///
/// An empty set passes: eligibility is about not targeting a platform the
/// payment pipeline cannot serve, while "at least one platform" is a
/// completeness requirement reported separately.
pub fn paid_policy_satisfied(platforms: &BTreeSet<Platform>) -> bool {
    platforms.iter().all(|p| p.paid_allowed())
}
