use crate::core::{TokenState, TransferStage};
use crate::utils::{Result, TokenError};

use super::{TransferContext, TransferPlan};

/// Blocked accounts can neither send nor receive
pub struct BlacklistStage;

impl TransferStage for BlacklistStage {
    fn name(&self) -> &'static str {
        "blacklist"
    }

    fn apply(&self, ctx: &TransferContext, state: &TokenState, _plan: &mut TransferPlan) -> Result<()> {
        for account in [ctx.from, ctx.to] {
            if state.is_blocked(account) {
                return Err(TokenError::AccountBlocked(account));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::*;

    #[test]
    fn test_sender_and_receiver_checked() {
        let mut state = launched_state();
        state.update_flags(addr(7), |f| f.blocked = true);
        let mut plan = TransferPlan::default();

        assert_eq!(
            BlacklistStage.apply(&ctx(&state, 7, 1, 1, 1), &state, &mut plan),
            Err(TokenError::AccountBlocked(addr(7)))
        );
        assert_eq!(
            BlacklistStage.apply(&ctx(&state, 1, 7, 1, 1), &state, &mut plan),
            Err(TokenError::AccountBlocked(addr(7)))
        );
        assert!(BlacklistStage.apply(&ctx(&state, 1, 2, 1, 1), &state, &mut plan).is_ok());
    }
}
