//! Enumerated choices for the presentation layer.
//!
//! The console asks the core which tiers and platforms are choosable
//! instead of re-deriving policy from form internals. Disabled platforms
//! come back with a reason; an ineligible PAID tier is hidden outright,
//! with the reason carried separately.

use devhub_shared::{Platform, Tier, PAID_PLATFORMS};
use serde::Serialize;

use crate::app::App;
use crate::config;

/// A tier the app may switch to (or is on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierChoice {
    pub tier: Tier,
    pub selected: bool,
}

/// A tier withheld from the picker, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenTier {
    pub tier: Tier,
    pub reason: String,
}

/// Tier picker contents for one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierChoices {
    pub offered: Vec<TierChoice>,
    pub hidden: Vec<HiddenTier>,
}

/// A platform row in the platform picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformChoice {
    pub platform: Platform,
    pub selected: bool,
    /// Present when the platform cannot be picked under the current tier.
    pub disabled_reason: Option<String>,
}

/// Which tiers this app can be on. PAID is hidden, not merely disabled,
/// when the active platform set violates the paid-mode policy.
pub fn tier_choices(app: &App) -> TierChoices {
    let current = app.config.tier;
    let mut offered = vec![TierChoice {
        tier: Tier::Free,
        selected: current == Tier::Free,
    }];
    let mut hidden = Vec::new();

    if config::paid_policy_satisfied(app.config.active_platforms()) {
        offered.push(TierChoice {
            tier: Tier::Paid,
            selected: current == Tier::Paid,
        });
    } else {
        hidden.push(HiddenTier {
            tier: Tier::Paid,
            reason: paid_platform_reason(),
        });
    }

    TierChoices { offered, hidden }
}

/// Every known platform with its selection state under the current tier.
pub fn platform_choices(app: &App) -> Vec<PlatformChoice> {
    let active = app.config.active_platforms();
    Platform::ALL
        .iter()
        .map(|platform| PlatformChoice {
            platform: *platform,
            selected: active.contains(platform),
            disabled_reason: (app.config.tier.is_paid() && !platform.paid_allowed())
                .then(|| format!("{platform} is not available for paid apps")),
        })
        .collect()
}

fn paid_platform_reason() -> String {
    let allowed: Vec<&str> = PAID_PLATFORMS.iter().map(Platform::as_str).collect();
    format!("paid apps can only target: {}", allowed.join(", "))
}
