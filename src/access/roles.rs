//! Role identifiers, laid out the way OpenZeppelin AccessControl hashes them

use ethers::types::H256;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::storage::keccak256_concat;

static MANAGER_ROLE_ID: Lazy<H256> = Lazy::new(|| H256::from(keccak256_concat(&[b"MANAGER_ROLE"])));
static UPGRADER_ROLE_ID: Lazy<H256> =
    Lazy::new(|| H256::from(keccak256_concat(&[b"UPGRADER_ROLE"])));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Grants and revokes roles, pauses, runs emergency withdrawals
    Admin,
    /// Day-to-day configuration, launch and manual swaps
    Manager,
    /// Authorizes proxy upgrades
    Upgrader,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Upgrader];

    /// bytes32 identifier; the admin role is the zero word.
    pub fn id(&self) -> H256 {
        match self {
            Role::Admin => H256::zero(),
            Role::Manager => *MANAGER_ROLE_ID,
            Role::Upgrader => *UPGRADER_ROLE_ID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "DEFAULT_ADMIN_ROLE",
            Role::Manager => "MANAGER_ROLE",
            Role::Upgrader => "UPGRADER_ROLE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
