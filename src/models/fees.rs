use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_FEE_BPS;
use crate::utils::{to_u128, Result, TokenError};

/// Direction of a token movement relative to the trading pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Pair -> account
    Buy,
    /// Account -> pair
    Sell,
    /// Wallet to wallet
    Transfer,
}

impl TransferKind {
    pub fn classify(from: Address, to: Address, pair: Option<Address>) -> Self {
        match pair {
            Some(pair) if from == pair => TransferKind::Buy,
            Some(pair) if to == pair => TransferKind::Sell,
            _ => TransferKind::Transfer,
        }
    }
}

/// Tax rates in basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fees {
    pub buy: u16,
    pub sell: u16,
    pub transfer: u16,
}

impl Fees {
    pub fn new(buy: u16, sell: u16, transfer: u16) -> Result<Self> {
        let fees = Self { buy, sell, transfer };
        fees.validate()?;
        Ok(fees)
    }

    pub fn validate(&self) -> Result<()> {
        for rate in [self.buy, self.sell, self.transfer] {
            if rate > MAX_FEE_BPS {
                return Err(TokenError::FeeTooHigh(rate));
            }
        }
        Ok(())
    }

    pub fn rate_for(&self, kind: TransferKind) -> u16 {
        match kind {
            TransferKind::Buy => self.buy,
            TransferKind::Sell => self.sell,
            TransferKind::Transfer => self.transfer,
        }
    }
}

/// Trading caps, held in 128-bit fields so two share a storage word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_buy: u128,
    pub max_sell: u128,
    pub max_wallet: u128,
}

impl Limits {
    pub fn from_amounts(max_buy: U256, max_sell: U256, max_wallet: U256) -> Result<Self> {
        let narrow = |v: U256| to_u128(v).map_err(|_| TokenError::InvalidLimit);
        let limits = Self {
            max_buy: narrow(max_buy)?,
            max_sell: narrow(max_sell)?,
            max_wallet: narrow(max_wallet)?,
        };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_buy == 0 || self.max_sell == 0 || self.max_wallet == 0 {
            return Err(TokenError::InvalidLimit);
        }
        Ok(())
    }

    pub fn max_buy(&self) -> U256 {
        U256::from(self.max_buy)
    }

    pub fn max_sell(&self) -> U256 {
        U256::from(self.max_sell)
    }

    pub fn max_wallet(&self) -> U256 {
        U256::from(self.max_wallet)
    }
}

/// Per-account switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountFlags {
    pub excluded_from_limits: bool,
    pub excluded_from_tax: bool,
    pub blocked: bool,
}
