use ethers::types::U256;

use crate::constants::{MAX_SWAP_MULTIPLIER, SWAP_BACK_COOLDOWN_BLOCKS};
use crate::core::{TokenState, TransferStage};
use crate::models::TransferKind;
use crate::utils::Result;

use super::{TransferContext, TransferPlan};

/// Decides whether accumulated tax is sold before this transfer
pub struct SwapTrigger;

impl TransferStage for SwapTrigger {
    fn name(&self) -> &'static str {
        "swap_trigger"
    }

    fn apply(&self, ctx: &TransferContext, state: &TokenState, plan: &mut TransferPlan) -> Result<()> {
        if !state.launched || state.in_swap_back || ctx.kind == TransferKind::Buy {
            return Ok(());
        }
        if state.is_excluded_from_tax(ctx.from) || state.is_excluded_from_tax(ctx.to) {
            return Ok(());
        }

        let balance = state.contract_balance();
        if balance <= state.swap_tokens_at_amount {
            return Ok(());
        }
        if ctx.block.saturating_sub(state.last_swap_back_block) < SWAP_BACK_COOLDOWN_BLOCKS {
            tracing::debug!(
                "Swap back cooling down (last at block {}, now {})",
                state.last_swap_back_block, ctx.block
            );
            return Ok(());
        }

        let cap = state
            .swap_tokens_at_amount
            .saturating_mul(U256::from(MAX_SWAP_MULTIPLIER));
        plan.swap_back = Some(balance.min(cap));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::*;

    fn planned(state: &TokenState, from: u64, to: u64, block: u64) -> Option<U256> {
        let mut plan = TransferPlan::default();
        SwapTrigger.apply(&ctx(state, from, to, 10, block), state, &mut plan).unwrap();
        plan.swap_back
    }

    #[test]
    fn test_threshold_must_be_exceeded() {
        let mut state = launched_state();
        state.set_balance(addr(TOKEN), U256::from(100));
        assert_eq!(planned(&state, 1, PAIR, 10), None);

        state.set_balance(addr(TOKEN), U256::from(101));
        assert_eq!(planned(&state, 1, PAIR, 10), Some(U256::from(101)));
    }

    #[test]
    fn test_capped_at_twenty_thresholds() {
        let mut state = launched_state();
        state.set_balance(addr(TOKEN), U256::from(5_000));
        assert_eq!(planned(&state, 1, PAIR, 10), Some(U256::from(2_000)));
    }

    #[test]
    fn test_cooldown() {
        let mut state = launched_state();
        state.set_balance(addr(TOKEN), U256::from(500));
        state.last_swap_back_block = 8;
        assert_eq!(planned(&state, 1, PAIR, 10), None);
        assert_eq!(planned(&state, 1, PAIR, 11), Some(U256::from(500)));
    }

    #[test]
    fn test_never_on_buys_or_before_launch() {
        let mut state = launched_state();
        state.set_balance(addr(TOKEN), U256::from(500));
        assert_eq!(planned(&state, PAIR, 1, 10), None);
        // plain transfers can trigger
        assert_eq!(planned(&state, 1, 2, 10), Some(U256::from(500)));

        state.launched = false;
        assert_eq!(planned(&state, 1, PAIR, 10), None);
    }
}
