//! Payment account registry.
//!
//! Accounts live in an external payment provider; the core only keeps the
//! per-developer links it needs to answer "has at least one account" and
//! "is this account id valid for this developer". Versioned like the
//! region catalog so binds can detect stale snapshots.

use std::collections::BTreeMap;

use devhub_shared::{DeveloperId, PaymentAccountId};
use serde::{Deserialize, Serialize};

/// A payment account linked by a developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAccount {
    pub id: PaymentAccountId,
    pub developer: DeveloperId,
    /// Display name chosen by the developer.
    pub name: String,
    /// Provider slug (e.g. "bango").
    pub provider: String,
}

/// Per-developer set of linked payment accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAccountRegistry {
    version: u64,
    accounts: BTreeMap<DeveloperId, Vec<PaymentAccount>>,
}

impl PaymentAccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Record a newly linked account, bumping the registry version.
    pub fn link_account(&mut self, account: PaymentAccount) -> PaymentAccountId {
        let id = account.id;
        self.accounts.entry(account.developer).or_default().push(account);
        self.version += 1;
        id
    }

    /// Drop a linked account. Returns whether anything was removed.
    pub fn unlink_account(&mut self, developer: DeveloperId, id: PaymentAccountId) -> bool {
        let Some(accounts) = self.accounts.get_mut(&developer) else {
            return false;
        };
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        let removed = accounts.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    pub fn has_accounts(&self, developer: DeveloperId) -> bool {
        self.accounts.get(&developer).is_some_and(|a| !a.is_empty())
    }

    pub fn accounts_for(&self, developer: DeveloperId) -> &[PaymentAccount] {
        self.accounts.get(&developer).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, developer: DeveloperId, id: PaymentAccountId) -> bool {
        self.accounts_for(developer).iter().any(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(developer: DeveloperId) -> PaymentAccount {
        PaymentAccount {
            id: PaymentAccountId::new(),
            developer,
            name: "Main account".to_string(),
            provider: "bango".to_string(),
        }
    }

    #[test]
    fn accounts_are_scoped_per_developer() {
        let mut registry = PaymentAccountRegistry::new();
        let alice = DeveloperId::new();
        let bob = DeveloperId::new();
        let id = registry.link_account(account(alice));

        assert!(registry.has_accounts(alice));
        assert!(!registry.has_accounts(bob));
        assert!(registry.contains(alice, id));
        assert!(!registry.contains(bob, id));
    }

    #[test]
    fn unlink_bumps_version_once() {
        let mut registry = PaymentAccountRegistry::new();
        let dev = DeveloperId::new();
        let id = registry.link_account(account(dev));
        let v = registry.version();

        assert!(registry.unlink_account(dev, id));
        assert_eq!(registry.version(), v + 1);
        assert!(!registry.unlink_account(dev, id));
        assert_eq!(registry.version(), v + 1);
    }
}
