use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::access::Role;
use super::fees::{Fees, Limits};

/// Everything the token would emit as a log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TokenEvent {
    Transfer { from: Address, to: Address, value: U256 },
    Approval { owner: Address, spender: Address, value: U256 },
    RoleGranted { role: Role, account: Address, sender: Address },
    RoleRevoked { role: Role, account: Address, sender: Address },
    Paused { account: Address },
    Unpaused { account: Address },
    FeesUpdated { fees: Fees },
    LimitsUpdated { limits: Limits },
    LimitsToggled { enabled: bool },
    TaxesToggled { enabled: bool },
    SwapThresholdUpdated { amount: U256 },
    WalletsUpdated { operations: Address, treasury: Address },
    OperationsShareUpdated { bps: u16 },
    AccountBlocked { account: Address, blocked: bool },
    ExcludedFromLimits { account: Address, excluded: bool },
    ExcludedFromTax { account: Address, excluded: bool },
    RouterUpdated { router: Address },
    Launched { pair: Address, token_amount: U256, native_amount: U256, liquidity: U256, block: u64 },
    SwapBack { tokens: U256, native: U256, operations: U256, treasury: U256, block: u64 },
    NativeRescued { to: Address, amount: U256 },
    TokensRescued { to: Address, amount: U256 },
    Upgraded { implementation: Address, version: u64 },
}

impl TokenEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TokenEvent::Transfer { .. } => "Transfer",
            TokenEvent::Approval { .. } => "Approval",
            TokenEvent::RoleGranted { .. } => "RoleGranted",
            TokenEvent::RoleRevoked { .. } => "RoleRevoked",
            TokenEvent::Paused { .. } => "Paused",
            TokenEvent::Unpaused { .. } => "Unpaused",
            TokenEvent::FeesUpdated { .. } => "FeesUpdated",
            TokenEvent::LimitsUpdated { .. } => "LimitsUpdated",
            TokenEvent::LimitsToggled { .. } => "LimitsToggled",
            TokenEvent::TaxesToggled { .. } => "TaxesToggled",
            TokenEvent::SwapThresholdUpdated { .. } => "SwapThresholdUpdated",
            TokenEvent::WalletsUpdated { .. } => "WalletsUpdated",
            TokenEvent::OperationsShareUpdated { .. } => "OperationsShareUpdated",
            TokenEvent::AccountBlocked { .. } => "AccountBlocked",
            TokenEvent::ExcludedFromLimits { .. } => "ExcludedFromLimits",
            TokenEvent::ExcludedFromTax { .. } => "ExcludedFromTax",
            TokenEvent::RouterUpdated { .. } => "RouterUpdated",
            TokenEvent::Launched { .. } => "Launched",
            TokenEvent::SwapBack { .. } => "SwapBack",
            TokenEvent::NativeRescued { .. } => "NativeRescued",
            TokenEvent::TokensRescued { .. } => "TokensRescued",
            TokenEvent::Upgraded { .. } => "Upgraded",
        }
    }
}
