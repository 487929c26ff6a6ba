//! Id newtypes used across the workspace.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Identifies an app (the aggregate root owning its monetization config).
    AppId
);
uuid_id!(
    /// Identifies a developer account.
    DeveloperId
);
uuid_id!(
    /// Identifies a linked payment account in the registry.
    PaymentAccountId
);

/// Region slug, lowercase (e.g. `"us"`, `"br"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

/// Reference to a price point in the marketplace price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTierId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_id_normalizes_case() {
        assert_eq!(RegionId::new("US"), RegionId::new("us"));
        assert_eq!(RegionId::new("Br").as_str(), "br");
    }

    #[test]
    fn app_ids_are_unique() {
        assert_ne!(AppId::new(), AppId::new());
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = AppId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
    }
}
