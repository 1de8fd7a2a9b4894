use ethers::types::{Address, U256};

use crate::core::{TokenState, TransferStage};
use crate::models::TransferKind;
use crate::utils::{Result, TokenError};

use super::{TransferContext, TransferPlan};

/// Max buy / max sell / max wallet, applied to the gross amount
pub struct LimitStage;

impl LimitStage {
    fn check_wallet(state: &TokenState, account: Address, amount: U256) -> Result<()> {
        let max = state.limits.max_wallet();
        let balance = state.balance_of(account).saturating_add(amount);
        if balance > max {
            return Err(TokenError::MaxWalletExceeded { account, balance, max });
        }
        Ok(())
    }
}

impl TransferStage for LimitStage {
    fn name(&self) -> &'static str {
        "limits"
    }

    fn apply(&self, ctx: &TransferContext, state: &TokenState, _plan: &mut TransferPlan) -> Result<()> {
        if !state.limits_enabled || state.in_swap_back {
            return Ok(());
        }

        match ctx.kind {
            TransferKind::Buy => {
                if state.is_excluded_from_limits(ctx.to) {
                    return Ok(());
                }
                let max = state.limits.max_buy();
                if ctx.amount > max {
                    return Err(TokenError::MaxBuyExceeded { amount: ctx.amount, max });
                }
                Self::check_wallet(state, ctx.to, ctx.amount)
            }
            TransferKind::Sell => {
                if state.is_excluded_from_limits(ctx.from) {
                    return Ok(());
                }
                let max = state.limits.max_sell();
                if ctx.amount > max {
                    return Err(TokenError::MaxSellExceeded { amount: ctx.amount, max });
                }
                Ok(())
            }
            TransferKind::Transfer => {
                if state.is_excluded_from_limits(ctx.to) {
                    return Ok(());
                }
                Self::check_wallet(state, ctx.to, ctx.amount)
            }
        }
    }
}
