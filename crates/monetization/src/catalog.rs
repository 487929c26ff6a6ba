//! Region catalog: reference data about marketplace regions.
//!
//! The catalog is read-mostly. Every mutation bumps `version`, which lets
//! editors detect that a snapshot they validated against has gone stale.

use std::collections::{BTreeMap, BTreeSet};

use devhub_shared::RegionId;
use serde::{Deserialize, Serialize};

/// Reference data for a single region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    /// Display name shown in the region picker.
    pub name: String,
    /// Whether the payment pipeline is wired up for this region.
    pub payment_supported: bool,
    /// Whether the region is part of the "worldwide" listing scope.
    /// Regions outside worldwide are only ever listed by explicit opt-in.
    pub in_worldwide: bool,
}

/// The full region catalog, versioned for stale-snapshot detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCatalog {
    version: u64,
    regions: BTreeMap<RegionId, RegionInfo>,
}

impl RegionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock region set the marketplace ships with.
    pub fn seed() -> Self {
        let mut catalog = Self::new();
        for (slug, name, payment, worldwide) in [
            ("us", "United States", true, true),
            ("gb", "United Kingdom", true, true),
            ("de", "Germany", true, true),
            ("es", "Spain", true, true),
            ("br", "Brazil", true, true),
            ("mx", "Mexico", false, true),
            ("pl", "Poland", false, true),
            ("cn", "China", false, false),
        ] {
            catalog.upsert_region(
                RegionId::new(slug),
                RegionInfo {
                    name: name.to_string(),
                    payment_supported: payment,
                    in_worldwide: worldwide,
                },
            );
        }
        catalog
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Insert or replace a region, bumping the catalog version.
    pub fn upsert_region(&mut self, id: RegionId, info: RegionInfo) {
        self.regions.insert(id, info);
        self.version += 1;
    }

    /// Flip a region's payment support flag. Returns false for unknown
    /// regions; the version is only bumped when something changed.
    pub fn set_payment_supported(&mut self, id: &RegionId, supported: bool) -> bool {
        match self.regions.get_mut(id) {
            Some(info) if info.payment_supported != supported => {
                info.payment_supported = supported;
                self.version += 1;
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn contains(&self, id: &RegionId) -> bool {
        self.regions.contains_key(id)
    }

    pub fn get(&self, id: &RegionId) -> Option<&RegionInfo> {
        self.regions.get(id)
    }

    /// Whether a region can carry paid listings. Unknown regions cannot.
    pub fn payment_supported(&self, id: &RegionId) -> bool {
        self.regions.get(id).is_some_and(|r| r.payment_supported)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &RegionInfo)> {
        self.regions.iter()
    }

    pub fn region_ids(&self) -> BTreeSet<RegionId> {
        self.regions.keys().cloned().collect()
    }

    /// Regions where paid listings are possible.
    pub fn payment_regions(&self) -> BTreeSet<RegionId> {
        self.regions
            .iter()
            .filter(|(_, info)| info.payment_supported)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// The default selection for a newly created app: every worldwide-member
    /// region. Opt-in-only regions stay unselected.
    pub fn default_selection(&self) -> BTreeSet<RegionId> {
        self.regions
            .iter()
            .filter(|(_, info)| info.in_worldwide)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalog_has_payment_and_worldwide_split() {
        let catalog = RegionCatalog::seed();
        assert!(catalog.payment_supported(&RegionId::new("us")));
        assert!(!catalog.payment_supported(&RegionId::new("mx")));
        assert!(!catalog.payment_supported(&RegionId::new("xx")));
        assert!(!catalog.default_selection().contains(&RegionId::new("cn")));
        assert!(catalog.default_selection().contains(&RegionId::new("pl")));
    }

    #[test]
    fn version_bumps_only_on_change() {
        let mut catalog = RegionCatalog::seed();
        let v = catalog.version();

        assert!(catalog.set_payment_supported(&RegionId::new("br"), true));
        assert_eq!(catalog.version(), v, "no-op flip must not bump");

        assert!(catalog.set_payment_supported(&RegionId::new("br"), false));
        assert_eq!(catalog.version(), v + 1);

        assert!(!catalog.set_payment_supported(&RegionId::new("xx"), true));
        assert_eq!(catalog.version(), v + 1);
    }
}
