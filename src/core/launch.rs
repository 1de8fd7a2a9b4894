//! Launch, swap back and manual swap

use ethers::types::{Address, U256};

use crate::access::Role;
use crate::constants::LAUNCH_SLIPPAGE_BPS;
use crate::core::{LiquidityReceipt, SwapRouter, TaxToken};
use crate::exchange::min_out;
use crate::models::TokenEvent;
use crate::utils::{bps_of, Result, TokenError};

/// Native proceeds of one swap back and where they went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBackReceipt {
    pub tokens: U256,
    pub native: U256,
    pub to_operations: U256,
    pub to_treasury: U256,
}

impl<R: SwapRouter> TaxToken<R> {
    /// Create the pair, seed it with `token_amount` contract tokens and
    /// `native_amount` of the caller's native currency, and open trading.
    pub fn launch(&mut self, caller: Address, token_amount: U256, native_amount: U256) -> Result<LiquidityReceipt> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            if t.state.launched {
                return Err(TokenError::AlreadyLaunched);
            }
            if t.state.router.is_zero() {
                return Err(TokenError::ZeroAddress("router"));
            }

            let token = t.state.address;
            let balance = t.state.contract_balance();
            if balance < token_amount {
                return Err(TokenError::InsufficientBalance { account: token, balance, needed: token_amount });
            }
            t.native.debit(caller, native_amount)?;

            let pair = t.router.create_pair(token)?;
            t.state.pair = Some(pair);
            t.transfer_internal(token, pair, token_amount)?;

            let treasury = t.state.treasury_wallet;
            let receipt = t.router.add_liquidity_native(
                token_amount,
                native_amount,
                min_out(token_amount, LAUNCH_SLIPPAGE_BPS)?,
                min_out(native_amount, LAUNCH_SLIPPAGE_BPS)?,
                treasury,
            )?;
            if receipt.native_used < native_amount {
                t.native.credit(caller, native_amount - receipt.native_used)?;
            }

            let block = t.env.number;
            t.state.launched = true;
            t.state.launch_block = Some(block);
            t.state.last_swap_back_block = block;
            t.emit(TokenEvent::Launched {
                pair,
                token_amount: receipt.token_used,
                native_amount: receipt.native_used,
                liquidity: receipt.liquidity,
                block,
            });
            tracing::info!(
                "🚀 Launched at block {}: pair {:?}, {} tokens / {} native, {} LP to treasury",
                block, pair, receipt.token_used, receipt.native_used, receipt.liquidity
            );
            Ok(receipt)
        })
    }

    /// Sell up to `amount` contract tokens now, ignoring threshold and cooldown.
    pub fn manual_swap(&mut self, caller: Address, amount: U256) -> Result<SwapBackReceipt> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            if t.state.pair.is_none() {
                return Err(TokenError::PairMissing);
            }
            let amount = amount.min(t.state.contract_balance());
            if amount.is_zero() {
                return Err(TokenError::NothingToSwap);
            }
            t.swap_back(amount)
        })
    }

    /// Guarded so the contract's own sale is neither taxed nor re-triggers.
    pub(crate) fn swap_back(&mut self, amount: U256) -> Result<SwapBackReceipt> {
        self.state.in_swap_back = true;
        let result = self.sell_contract_tokens(amount);
        self.state.in_swap_back = false;
        result
    }

    fn sell_contract_tokens(&mut self, amount: U256) -> Result<SwapBackReceipt> {
        let pair = self.state.pair.ok_or(TokenError::PairMissing)?;
        let token = self.state.address;

        let expected = self.router.quote_tokens_for_native(amount)?;
        let minimum = min_out(expected, self.state.swap_slippage_bps)?;
        self.transfer_internal(token, pair, amount)?;
        let native = self.router.swap_exact_tokens_for_native(amount, minimum)?;
        self.native.credit(token, native)?;

        let to_operations = bps_of(native, self.state.operations_share_bps)?;
        let to_treasury = native - to_operations;
        self.native.transfer(token, self.state.operations_wallet, to_operations)?;
        self.native.transfer(token, self.state.treasury_wallet, to_treasury)?;

        let block = self.env.number;
        self.state.last_swap_back_block = block;
        self.emit(TokenEvent::SwapBack {
            tokens: amount,
            native,
            operations: to_operations,
            treasury: to_treasury,
            block,
        });
        tracing::info!(
            "💱 Swap back at block {}: {} tokens -> {} native ({} operations, {} treasury)",
            block, amount, native, to_operations, to_treasury
        );
        Ok(SwapBackReceipt { tokens: amount, native, to_operations, to_treasury })
    }
}
