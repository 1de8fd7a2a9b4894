use std::path::Path;

use ethers::types::U256;
use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::models::TokenConfig;
use crate::utils::{amount_serde, SimResult};

/// A named sequence of calls against a freshly deployed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub config: TokenConfig,
    /// Native currency handed out before the first step
    #[serde(default)]
    pub funding: Vec<Funding>,
    /// Actors whose receive hook reverts
    #[serde(default)]
    pub rejecting: Vec<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Funding {
    pub actor: String,
    #[serde(with = "amount_serde")]
    pub amount: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    /// Error variant the call must revert with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<String>,
}

fn zero() -> U256 {
    U256::zero()
}

/// Every call a scenario can make; actors are referenced by label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Transfer {
        from: String,
        to: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
    Approve {
        owner: String,
        spender: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
    TransferFrom {
        spender: String,
        from: String,
        to: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
    /// Signed off-chain by `owner`, submitted by anyone
    Permit {
        owner: String,
        spender: String,
        #[serde(with = "amount_serde")]
        amount: U256,
        /// Seconds from now until the signature expires
        #[serde(default = "default_permit_window")]
        valid_for_secs: u64,
    },
    Buy {
        trader: String,
        #[serde(with = "amount_serde")]
        native: U256,
        #[serde(with = "amount_serde", default = "zero")]
        min_out: U256,
    },
    Sell {
        trader: String,
        #[serde(with = "amount_serde")]
        amount: U256,
        #[serde(with = "amount_serde", default = "zero")]
        min_out: U256,
    },
    Launch {
        caller: String,
        #[serde(with = "amount_serde")]
        tokens: U256,
        #[serde(with = "amount_serde")]
        native: U256,
    },
    ManualSwap {
        caller: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
    SetFees {
        caller: String,
        buy: u16,
        sell: u16,
        transfer: u16,
    },
    SetLimits {
        caller: String,
        #[serde(with = "amount_serde")]
        max_buy: U256,
        #[serde(with = "amount_serde")]
        max_sell: U256,
        #[serde(with = "amount_serde")]
        max_wallet: U256,
    },
    SetLimitsEnabled {
        caller: String,
        enabled: bool,
    },
    SetTaxesEnabled {
        caller: String,
        enabled: bool,
    },
    SetSwapThreshold {
        caller: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
    SetWallets {
        caller: String,
        operations: String,
        treasury: String,
    },
    SetOperationsShare {
        caller: String,
        bps: u16,
    },
    Block {
        caller: String,
        account: String,
    },
    Unblock {
        caller: String,
        account: String,
    },
    ExcludeFromLimits {
        caller: String,
        accounts: Vec<String>,
        excluded: bool,
    },
    ExcludeFromTax {
        caller: String,
        accounts: Vec<String>,
        excluded: bool,
    },
    GrantRole {
        caller: String,
        role: Role,
        account: String,
    },
    RevokeRole {
        caller: String,
        role: Role,
        account: String,
    },
    Pause {
        caller: String,
    },
    Unpause {
        caller: String,
    },
    RescueNative {
        caller: String,
        to: String,
    },
    RescueTokens {
        caller: String,
        to: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
    Upgrade {
        caller: String,
        implementation: String,
    },
    AdvanceBlocks {
        blocks: u64,
    },
    ExpectBalance {
        account: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
    ExpectNative {
        account: String,
        #[serde(with = "amount_serde")]
        amount: U256,
    },
}

fn default_permit_window() -> u64 {
    3_600
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Transfer { .. } => "transfer",
            Action::Approve { .. } => "approve",
            Action::TransferFrom { .. } => "transfer_from",
            Action::Permit { .. } => "permit",
            Action::Buy { .. } => "buy",
            Action::Sell { .. } => "sell",
            Action::Launch { .. } => "launch",
            Action::ManualSwap { .. } => "manual_swap",
            Action::SetFees { .. } => "set_fees",
            Action::SetLimits { .. } => "set_limits",
            Action::SetLimitsEnabled { .. } => "set_limits_enabled",
            Action::SetTaxesEnabled { .. } => "set_taxes_enabled",
            Action::SetSwapThreshold { .. } => "set_swap_threshold",
            Action::SetWallets { .. } => "set_wallets",
            Action::SetOperationsShare { .. } => "set_operations_share",
            Action::Block { .. } => "block",
            Action::Unblock { .. } => "unblock",
            Action::ExcludeFromLimits { .. } => "exclude_from_limits",
            Action::ExcludeFromTax { .. } => "exclude_from_tax",
            Action::GrantRole { .. } => "grant_role",
            Action::RevokeRole { .. } => "revoke_role",
            Action::Pause { .. } => "pause",
            Action::Unpause { .. } => "unpause",
            Action::RescueNative { .. } => "rescue_native",
            Action::RescueTokens { .. } => "rescue_tokens",
            Action::Upgrade { .. } => "upgrade",
            Action::AdvanceBlocks { .. } => "advance_blocks",
            Action::ExpectBalance { .. } => "expect_balance",
            Action::ExpectNative { .. } => "expect_native",
        }
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
