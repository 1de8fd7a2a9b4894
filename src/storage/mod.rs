//! Storage view of the token
//!
//! The model keeps its state in ordinary Rust collections. This module
//! describes how the same state sits in EVM storage: which words are packed,
//! which slot a mapping entry lands in, and what a write costs.

mod layout;
mod slot_calculator;
mod gas;

pub use layout::{
    pack_account_flags, pack_fee_config, pack_limits, slots, unpack_account_flags,
    unpack_fee_config, unpack_limits, ConfigFlags, FeeLayout,
};
pub use slot_calculator::{address_word, keccak256_concat, mapping_slot, nested_mapping_slot, u256_word};
pub use gas::{
    cold_sstore_cost, fee_read_gas, fee_update_gas, GasEstimate, COLD_SLOAD_COST,
    SSTORE_RESET_GAS, SSTORE_SET_GAS, WARM_STORAGE_READ_COST,
};

use std::collections::BTreeMap;

use ethers::types::{Address, U256};

/// Slot -> word dump of a token's storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSnapshot {
    words: BTreeMap<U256, U256>,
}

impl StorageSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero words are omitted, as the EVM does.
    pub fn write(&mut self, slot: U256, value: U256) {
        if value.is_zero() {
            self.words.remove(&slot);
        } else {
            self.words.insert(slot, value);
        }
    }

    pub fn read(&self, slot: U256) -> U256 {
        self.words.get(&slot).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&U256, &U256)> {
        self.words.iter()
    }

    pub fn balance_slot(account: Address) -> U256 {
        mapping_slot(account, U256::from(slots::BALANCES))
    }

    pub fn allowance_slot(owner: Address, spender: Address) -> U256 {
        nested_mapping_slot(owner, spender, U256::from(slots::ALLOWANCES))
    }

    pub fn account_flags_slot(account: Address) -> U256 {
        mapping_slot(account, U256::from(slots::ACCOUNT_FLAGS))
    }

    pub fn nonce_slot(account: Address) -> U256 {
        mapping_slot(account, U256::from(slots::NONCES))
    }
}
