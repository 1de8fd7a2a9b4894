use ethers::types::{Address, U256};

use crate::core::TokenState;
use crate::pipeline::{TransferContext, TransferPlan};
use crate::utils::Result;

/// One stage of the transfer hook
///
/// Stages only read token state; their whole effect is either an error that
/// aborts the transfer or an edit to the plan the token later executes.
pub trait TransferStage: Send + Sync {
    /// Unique identifier for this stage
    fn name(&self) -> &'static str;

    /// Check the transfer and contribute to the plan
    fn apply(&self, ctx: &TransferContext, state: &TokenState, plan: &mut TransferPlan) -> Result<()>;
}

/// Amounts actually consumed by an add-liquidity call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityReceipt {
    pub token_used: U256,
    pub native_used: U256,
    pub liquidity: U256,
}

/// Exchange router the token launches on and sells its tax through
///
/// Token balances stay in the token ledger; implementations only track the
/// pair reserves and price swaps against them.
pub trait SwapRouter: std::fmt::Debug + Clone + Send + Sync {
    fn address(&self) -> Address;

    fn pair(&self) -> Option<Address>;

    /// Address `create_pair(token)` will return; known before the pair exists.
    fn pair_for(&self, token: Address) -> Address;

    fn create_pair(&mut self, token: Address) -> Result<Address>;

    /// (token reserve, native reserve)
    fn reserves(&self) -> (U256, U256);

    fn add_liquidity_native(
        &mut self,
        token_desired: U256,
        native_desired: U256,
        token_min: U256,
        native_min: U256,
        to: Address,
    ) -> Result<LiquidityReceipt>;

    fn quote_tokens_for_native(&self, amount_in: U256) -> Result<U256>;

    fn quote_native_for_tokens(&self, native_in: U256) -> Result<U256>;

    fn swap_exact_tokens_for_native(&mut self, amount_in: U256, amount_out_min: U256) -> Result<U256>;

    fn swap_exact_native_for_tokens(&mut self, native_in: U256, amount_out_min: U256) -> Result<U256>;
}
