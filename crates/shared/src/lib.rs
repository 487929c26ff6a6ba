#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shared domain vocabulary for the developer hub.
//!
//! Types that cross crate boundaries: id newtypes, the monetization
//! tier, and the platform families an app can target.

pub mod ids;
pub mod platform;
pub mod tier;

pub use ids::{AppId, DeveloperId, PaymentAccountId, PriceTierId, RegionId};
pub use platform::{Platform, PAID_PLATFORMS};
pub use tier::Tier;
