//! Bit-packed storage words for the token's configuration

use ethers::types::U256;

use crate::models::{AccountFlags, Fees, Limits};

/// Declared slot numbers of the packed layout.
pub mod slots {
    pub const BALANCES: u64 = 0;
    pub const ALLOWANCES: u64 = 1;
    pub const TOTAL_SUPPLY: u64 = 2;
    /// buy | sell | transfer | limits_enabled | taxes_enabled | launched
    pub const FEE_CONFIG: u64 = 3;
    /// max_buy | max_sell
    pub const TRADE_LIMITS: u64 = 4;
    /// max_wallet | last_swap_back_block
    pub const WALLET_LIMIT: u64 = 5;
    pub const SWAP_THRESHOLD: u64 = 6;
    pub const ACCOUNT_FLAGS: u64 = 7;
    pub const NONCES: u64 = 8;
}

const FLAG_LIMITS_ENABLED: usize = 48;
const FLAG_TAXES_ENABLED: usize = 49;
const FLAG_LAUNCHED: usize = 50;

/// How the fee configuration is spread over slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeLayout {
    /// One uint256 slot per rate, flags elsewhere
    Unpacked,
    /// All three rates as uint16 plus the flags in one slot
    Packed,
}

impl FeeLayout {
    pub fn slot_count(&self) -> usize {
        match self {
            FeeLayout::Unpacked => 3,
            FeeLayout::Packed => 1,
        }
    }

    /// Words holding the fee rates under this layout.
    pub fn fee_words(&self, fees: &Fees, flags: &ConfigFlags) -> Vec<U256> {
        match self {
            FeeLayout::Unpacked => vec![
                U256::from(fees.buy),
                U256::from(fees.sell),
                U256::from(fees.transfer),
            ],
            FeeLayout::Packed => vec![pack_fee_config(fees, flags)],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FeeLayout::Unpacked => "unpacked (3 x uint256)",
            FeeLayout::Packed => "packed (3 x uint16 + flags)",
        }
    }
}

impl std::fmt::Display for FeeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Boolean switches stored next to the fee rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigFlags {
    pub limits_enabled: bool,
    pub taxes_enabled: bool,
    pub launched: bool,
}

fn bit(word: U256, index: usize) -> bool {
    word.bit(index)
}

fn set_bit(word: &mut U256, index: usize, value: bool) {
    if value {
        *word = *word | (U256::one() << index);
    }
}

fn low_u128(word: U256) -> u128 {
    (word & U256::from(u128::MAX)).as_u128()
}

pub fn pack_fee_config(fees: &Fees, flags: &ConfigFlags) -> U256 {
    let mut word = U256::from(fees.buy)
        | (U256::from(fees.sell) << 16)
        | (U256::from(fees.transfer) << 32);
    set_bit(&mut word, FLAG_LIMITS_ENABLED, flags.limits_enabled);
    set_bit(&mut word, FLAG_TAXES_ENABLED, flags.taxes_enabled);
    set_bit(&mut word, FLAG_LAUNCHED, flags.launched);
    word
}

pub fn unpack_fee_config(word: U256) -> (Fees, ConfigFlags) {
    let field = |shift: usize| ((word >> shift) & U256::from(0xffffu64)).as_u32() as u16;
    let fees = Fees { buy: field(0), sell: field(16), transfer: field(32) };
    let flags = ConfigFlags {
        limits_enabled: bit(word, FLAG_LIMITS_ENABLED),
        taxes_enabled: bit(word, FLAG_TAXES_ENABLED),
        launched: bit(word, FLAG_LAUNCHED),
    };
    (fees, flags)
}

/// Two words: `[max_buy | max_sell << 128, max_wallet | last_block << 128]`.
pub fn pack_limits(limits: &Limits, last_swap_back_block: u64) -> [U256; 2] {
    [
        U256::from(limits.max_buy) | (U256::from(limits.max_sell) << 128),
        U256::from(limits.max_wallet) | (U256::from(last_swap_back_block) << 128),
    ]
}

pub fn unpack_limits(words: [U256; 2]) -> (Limits, u64) {
    let limits = Limits {
        max_buy: low_u128(words[0]),
        max_sell: low_u128(words[0] >> 128),
        max_wallet: low_u128(words[1]),
    };
    let last_block = (words[1] >> 128).low_u64();
    (limits, last_block)
}

pub fn pack_account_flags(flags: &AccountFlags) -> U256 {
    let mut word = U256::zero();
    set_bit(&mut word, 0, flags.excluded_from_limits);
    set_bit(&mut word, 1, flags.excluded_from_tax);
    set_bit(&mut word, 2, flags.blocked);
    word
}

pub fn unpack_account_flags(word: U256) -> AccountFlags {
    AccountFlags {
        excluded_from_limits: bit(word, 0),
        excluded_from_tax: bit(word, 1),
        blocked: bit(word, 2),
    }
}
