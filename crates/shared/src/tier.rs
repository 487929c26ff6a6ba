//! Monetization tier of an app.

use serde::{Deserialize, Serialize};

/// Whether an app is distributed for free or sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Paid,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Paid => "paid",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Tier::Paid)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Paid).unwrap(), "\"paid\"");
        let back: Tier = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(back, Tier::Free);
    }
}
