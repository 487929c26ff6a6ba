//! Platform families an app can target.

use serde::{Deserialize, Serialize};

/// A platform the marketplace can list an app on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Desktop,
    Android,
    #[serde(rename = "firefoxos")]
    FirefoxOs,
}

/// Platforms allowed to run apps in paid mode.
///
/// Payments are only wired up on the device platform; desktop and Android
/// listings stay free-only until their payment flows ship.
pub const PAID_PLATFORMS: &[Platform] = &[Platform::FirefoxOs];

impl Platform {
    pub const ALL: &'static [Platform] = &[Platform::Desktop, Platform::Android, Platform::FirefoxOs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Desktop => "desktop",
            Platform::Android => "android",
            Platform::FirefoxOs => "firefoxos",
        }
    }

    pub fn paid_allowed(&self) -> bool {
        PAID_PLATFORMS.contains(self)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Platform::Desktop),
            "android" => Ok(Platform::Android),
            "firefoxos" => Ok(Platform::FirefoxOs),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

/// Parse error for platform slugs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);
