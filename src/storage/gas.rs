//! Storage gas under EIP-2929 (cold access) and EIP-2200 (net metering)

use ethers::types::U256;

use super::layout::{ConfigFlags, FeeLayout};
use crate::models::Fees;

pub const COLD_SLOAD_COST: u64 = 2_100;
pub const WARM_STORAGE_READ_COST: u64 = 100;
pub const SSTORE_SET_GAS: u64 = 20_000;
pub const SSTORE_RESET_GAS: u64 = 2_900;

/// Cost of one SSTORE to a slot not touched earlier in the transaction.
pub fn cold_sstore_cost(current: U256, new: U256) -> u64 {
    let write = if current == new {
        WARM_STORAGE_READ_COST
    } else if current.is_zero() {
        SSTORE_SET_GAS
    } else {
        SSTORE_RESET_GAS
    };
    COLD_SLOAD_COST + write
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    pub layout: FeeLayout,
    pub slots: usize,
    pub gas: u64,
}

/// Gas of reading all fee rates once, every slot cold.
pub fn fee_read_gas(layout: FeeLayout) -> GasEstimate {
    let slots = layout.slot_count();
    GasEstimate { layout, slots, gas: slots as u64 * COLD_SLOAD_COST }
}

/// Gas of rewriting the fee rates from `old` to `new`.
pub fn fee_update_gas(
    layout: FeeLayout,
    old: (&Fees, &ConfigFlags),
    new: (&Fees, &ConfigFlags),
) -> GasEstimate {
    let before = layout.fee_words(old.0, old.1);
    let after = layout.fee_words(new.0, new.1);
    let gas = before
        .iter()
        .zip(after.iter())
        .map(|(current, next)| cold_sstore_cost(*current, *next))
        .sum();
    GasEstimate { layout, slots: after.len(), gas }
}
