//! Role-based access control
//!
//! Three roles gate every sensitive entry point. The admin role administers
//! all three, including itself.

mod roles;

pub use roles::Role;

use std::collections::{BTreeMap, BTreeSet};

use ethers::types::Address;

use crate::utils::{Result, TokenError};

#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    members: BTreeMap<Role, BTreeSet<Address>>,
}

impl AccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.members
            .get(&role)
            .map(|set| set.contains(&account))
            .unwrap_or(false)
    }

    /// Fails with `MissingRole` unless `account` holds `role`.
    pub fn check_role(&self, role: Role, account: Address) -> Result<()> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            tracing::warn!("⛔ {:?} lacks {}", account, role);
            Err(TokenError::MissingRole { account, role })
        }
    }

    /// Returns true when membership changed.
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Returns true when membership changed.
    pub fn revoke(&mut self, role: Role, account: Address) -> bool {
        self.members
            .get_mut(&role)
            .map(|set| set.remove(&account))
            .unwrap_or(false)
    }

    pub fn members(&self, role: Role) -> Vec<Address> {
        self.members
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}
