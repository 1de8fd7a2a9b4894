use crate::core::{TokenState, TransferStage};
use crate::utils::{bps_of, Result};

use super::{TransferContext, TransferPlan};

/// Withholds `amount * rate / 10_000` for the contract
pub struct TaxStage;

impl TransferStage for TaxStage {
    fn name(&self) -> &'static str {
        "tax"
    }

    fn apply(&self, ctx: &TransferContext, state: &TokenState, plan: &mut TransferPlan) -> Result<()> {
        if !state.taxes_enabled || state.in_swap_back {
            return Ok(());
        }
        if state.is_excluded_from_tax(ctx.from) || state.is_excluded_from_tax(ctx.to) {
            return Ok(());
        }
        plan.tax = bps_of(ctx.amount, state.fees.rate_for(ctx.kind))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::*;
    use ethers::types::U256;

    fn tax(state: &TokenState, from: u64, to: u64, amount: u64) -> U256 {
        let mut plan = TransferPlan::default();
        TaxStage.apply(&ctx(state, from, to, amount, 1), state, &mut plan).unwrap();
        plan.tax
    }

    #[test]
    fn test_rate_by_kind() {
        let state = launched_state();
        assert_eq!(tax(&state, PAIR, 1, 1_000), U256::from(50));
        assert_eq!(tax(&state, 1, PAIR, 1_000), U256::from(100));
        assert_eq!(tax(&state, 1, 2, 1_000), U256::from(10));
    }

    #[test]
    fn test_rounds_down() {
        let state = launched_state();
        // 5% of 19 = 0.95
        assert_eq!(tax(&state, PAIR, 1, 19), U256::zero());
    }

    #[test]
    fn test_skipped_for_excluded_or_in_swap() {
        let mut state = launched_state();
        state.update_flags(addr(1), |f| f.excluded_from_tax = true);
        assert_eq!(tax(&state, 1, PAIR, 1_000), U256::zero());
        assert_eq!(tax(&state, PAIR, 1, 1_000), U256::zero());

        state.in_swap_back = true;
        assert_eq!(tax(&state, 2, PAIR, 1_000), U256::zero());

        state.in_swap_back = false;
        state.taxes_enabled = false;
        assert_eq!(tax(&state, 2, PAIR, 1_000), U256::zero());
    }
}
