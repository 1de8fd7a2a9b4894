use ethers::types::U256;
use serde::{Deserialize, Serialize};

use crate::utils::{amount_serde, Result, TokenError};
use super::fees::{Fees, Limits};

/// Initial parameters of a token deployment. Every field has a default so a
/// scenario file only needs to list what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub chain_id: u64,
    #[serde(with = "amount_serde")]
    pub total_supply: U256,
    pub fees: Fees,
    #[serde(with = "amount_serde")]
    pub max_buy: U256,
    #[serde(with = "amount_serde")]
    pub max_sell: U256,
    #[serde(with = "amount_serde")]
    pub max_wallet: U256,
    #[serde(with = "amount_serde")]
    pub swap_tokens_at_amount: U256,
    /// Share of swap proceeds sent to the operations wallet; the rest goes to treasury
    pub operations_share_bps: u16,
    /// Minimum-output tolerance on automatic and manual swaps
    pub swap_slippage_bps: u16,
    pub limits_enabled: bool,
    pub taxes_enabled: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        let unit = U256::exp10(18);
        let supply = U256::from(1_000_000_000u64) * unit;
        Self {
            name: "Tax Token".to_string(),
            symbol: "TAX".to_string(),
            decimals: 18,
            chain_id: 1,
            total_supply: supply,
            fees: Fees { buy: 500, sell: 500, transfer: 0 },
            max_buy: supply / 100,
            max_sell: supply / 100,
            max_wallet: supply / 50,
            swap_tokens_at_amount: supply / 2_000,
            operations_share_bps: 5_000,
            swap_slippage_bps: 500,
            limits_enabled: true,
            taxes_enabled: true,
        }
    }
}

impl TokenConfig {
    pub fn limits(&self) -> Result<Limits> {
        Limits::from_amounts(self.max_buy, self.max_sell, self.max_wallet)
    }

    pub fn validate(&self) -> Result<()> {
        self.fees.validate()?;
        self.limits()?;
        if self.swap_tokens_at_amount.is_zero() || self.swap_tokens_at_amount > self.total_supply {
            return Err(TokenError::InvalidSwapThreshold(self.swap_tokens_at_amount));
        }
        for bps in [self.operations_share_bps, self.swap_slippage_bps] {
            if u64::from(bps) > crate::constants::BPS_DENOMINATOR {
                return Err(TokenError::InvalidShare(bps));
            }
        }
        Ok(())
    }
}
