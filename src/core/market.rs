//! Trading through the router
//!
//! These mirror the router's `swapExactETHForTokensSupportingFeeOnTransferTokens`
//! and `swapExactTokensForETHSupportingFeeOnTransferTokens`: the pair sends or
//! receives tokens through the hooked transfer, so buys and sells see limits,
//! tax and the swap trigger exactly as on chain.

use ethers::types::{Address, U256};

use crate::core::{SwapRouter, TaxToken};
use crate::utils::{Result, TokenError};

impl<R: SwapRouter> TaxToken<R> {
    /// Spend `native_in` on tokens; returns what actually arrived after tax.
    pub fn buy(&mut self, trader: Address, native_in: U256, min_tokens_out: U256) -> Result<U256> {
        self.atomically(|t| {
            let pair = t.state.pair.ok_or(TokenError::PairMissing)?;
            t.native.debit(trader, native_in)?;
            let tokens_out = t.router.swap_exact_native_for_tokens(native_in, U256::zero())?;

            let before = t.state.balance_of(trader);
            t.transfer_internal(pair, trader, tokens_out)?;
            let received = t.state.balance_of(trader).saturating_sub(before);
            if received < min_tokens_out {
                return Err(TokenError::InsufficientOutput { amount: received, minimum: min_tokens_out });
            }
            tracing::debug!("{:?} bought {} tokens for {} native", trader, received, native_in);
            Ok(received)
        })
    }

    /// Sell `amount` tokens; returns the native currency paid out.
    ///
    /// The input is measured as the pair's balance above its reserve, so a
    /// swap back triggered by this sell is not counted as the trader's.
    pub fn sell(&mut self, trader: Address, amount: U256, min_native_out: U256) -> Result<U256> {
        self.atomically(|t| {
            let pair = t.state.pair.ok_or(TokenError::PairMissing)?;
            t.transfer_internal(trader, pair, amount)?;

            let (reserve_token, _) = t.router.reserves();
            let received = t.state.balance_of(pair).saturating_sub(reserve_token);
            let native_out = t.router.swap_exact_tokens_for_native(received, min_native_out)?;
            t.native.credit(trader, native_out)?;
            tracing::debug!("{:?} sold {} tokens ({} net) for {} native", trader, amount, received, native_out);
            Ok(native_out)
        })
    }
}
