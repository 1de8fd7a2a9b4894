use ethers::types::{Address, U256};
use thiserror::Error;

use crate::access::Role;

/// Named failure conditions. Any error aborts the whole call and leaves the
/// token untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Account {account:?} is missing role {role}")]
    MissingRole { account: Address, role: Role },

    #[error("Transfers are paused")]
    EnforcedPause,

    #[error("Token is not paused")]
    ExpectedPause,

    #[error("Trading is not active yet")]
    TradingNotActive,

    #[error("Account {0:?} is blocked")]
    AccountBlocked(Address),

    #[error("Account {0:?} cannot be blocked")]
    CannotBlock(Address),

    #[error("Buy of {amount} exceeds max buy {max}")]
    MaxBuyExceeded { amount: U256, max: U256 },

    #[error("Sell of {amount} exceeds max sell {max}")]
    MaxSellExceeded { amount: U256, max: U256 },

    #[error("Balance {balance} of {account:?} would exceed max wallet {max}")]
    MaxWalletExceeded { account: Address, balance: U256, max: U256 },

    #[error("Fee of {0} bps exceeds the 2000 bps cap")]
    FeeTooHigh(u16),

    #[error("Share of {0} bps exceeds 10000")]
    InvalidShare(u16),

    #[error("Batch of {0} accounts exceeds the 50 account cap")]
    BatchTooLarge(usize),

    #[error("Limit must be non-zero and fit in 128 bits")]
    InvalidLimit,

    #[error("Swap threshold {0} is out of range")]
    InvalidSwapThreshold(U256),

    #[error("Token already launched")]
    AlreadyLaunched,

    #[error("Router cannot change after launch")]
    RouterLocked,

    #[error("Pair does not exist")]
    PairMissing,

    #[error("Pair already exists")]
    PairExists,

    #[error("Invalid zero address for {0}")]
    ZeroAddress(&'static str),

    #[error("Sender {0:?} is invalid")]
    InvalidSender(Address),

    #[error("Receiver {0:?} is invalid")]
    InvalidReceiver(Address),

    #[error("Insufficient balance for {account:?}: has {balance}, needs {needed}")]
    InsufficientBalance { account: Address, balance: U256, needed: U256 },

    #[error("Insufficient allowance for {spender:?}: has {allowance}, needs {needed}")]
    InsufficientAllowance { spender: Address, allowance: U256, needed: U256 },

    #[error("Insufficient native balance for {account:?}: has {balance}, needs {needed}")]
    InsufficientNative { account: Address, balance: U256, needed: U256 },

    #[error("Native transfer to {0:?} failed")]
    NativeTransferFailed(Address),

    #[error("Insufficient output: got {amount}, minimum {minimum}")]
    InsufficientOutput { amount: U256, minimum: U256 },

    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    #[error("Nothing to swap")]
    NothingToSwap,

    #[error("Permit expired at {deadline}, now {now}")]
    PermitExpired { deadline: U256, now: u64 },

    #[error("Permit signed by {signer:?}, expected {owner:?}")]
    InvalidSigner { signer: Address, owner: Address },

    #[error("Malformed signature: {0}")]
    InvalidSignature(String),

    #[error("Arithmetic overflow")]
    Overflow,
}

impl TokenError {
    /// Bare variant name, e.g. `"MaxBuyExceeded"`.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::MissingRole { .. } => "MissingRole",
            TokenError::EnforcedPause => "EnforcedPause",
            TokenError::ExpectedPause => "ExpectedPause",
            TokenError::TradingNotActive => "TradingNotActive",
            TokenError::AccountBlocked(..) => "AccountBlocked",
            TokenError::CannotBlock(..) => "CannotBlock",
            TokenError::MaxBuyExceeded { .. } => "MaxBuyExceeded",
            TokenError::MaxSellExceeded { .. } => "MaxSellExceeded",
            TokenError::MaxWalletExceeded { .. } => "MaxWalletExceeded",
            TokenError::FeeTooHigh(..) => "FeeTooHigh",
            TokenError::InvalidShare(..) => "InvalidShare",
            TokenError::BatchTooLarge(..) => "BatchTooLarge",
            TokenError::InvalidLimit => "InvalidLimit",
            TokenError::InvalidSwapThreshold(..) => "InvalidSwapThreshold",
            TokenError::AlreadyLaunched => "AlreadyLaunched",
            TokenError::RouterLocked => "RouterLocked",
            TokenError::PairMissing => "PairMissing",
            TokenError::PairExists => "PairExists",
            TokenError::ZeroAddress(..) => "ZeroAddress",
            TokenError::InvalidSender(..) => "InvalidSender",
            TokenError::InvalidReceiver(..) => "InvalidReceiver",
            TokenError::InsufficientBalance { .. } => "InsufficientBalance",
            TokenError::InsufficientAllowance { .. } => "InsufficientAllowance",
            TokenError::InsufficientNative { .. } => "InsufficientNative",
            TokenError::NativeTransferFailed(..) => "NativeTransferFailed",
            TokenError::InsufficientOutput { .. } => "InsufficientOutput",
            TokenError::InsufficientLiquidity => "InsufficientLiquidity",
            TokenError::NothingToSwap => "NothingToSwap",
            TokenError::PermitExpired { .. } => "PermitExpired",
            TokenError::InvalidSigner { .. } => "InvalidSigner",
            TokenError::InvalidSignature(..) => "InvalidSignature",
            TokenError::Overflow => "Overflow",
        }
    }
}

/// Failures of the scenario layer that wraps the token.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Token call failed: {0}")]
    Token(#[from] TokenError),

    #[error("Unknown actor: {0}")]
    UnknownActor(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Step {step} expectation failed: {message}")]
    ExpectationFailed { step: usize, message: String },

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TokenError>;
pub type SimResult<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_variant_name() {
        assert_eq!(TokenError::EnforcedPause.kind(), "EnforcedPause");
        assert_eq!(TokenError::FeeTooHigh(2_001).kind(), "FeeTooHigh");
        assert_eq!(
            TokenError::MaxBuyExceeded { amount: U256::one(), max: U256::zero() }.kind(),
            "MaxBuyExceeded"
        );
        assert_eq!(TokenError::Overflow.kind(), "Overflow");
    }
}
