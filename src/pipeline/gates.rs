use crate::core::{TokenState, TransferStage};
use crate::utils::{Result, TokenError};

use super::{TransferContext, TransferPlan};

/// Rejects every movement while the token is paused
pub struct PauseGate;

impl TransferStage for PauseGate {
    fn name(&self) -> &'static str {
        "pause_gate"
    }

    fn apply(&self, _ctx: &TransferContext, state: &TokenState, _plan: &mut TransferPlan) -> Result<()> {
        if state.paused {
            return Err(TokenError::EnforcedPause);
        }
        Ok(())
    }
}

/// Before launch only limit-exempt accounts may move tokens
pub struct LaunchGate;

impl TransferStage for LaunchGate {
    fn name(&self) -> &'static str {
        "launch_gate"
    }

    fn apply(&self, ctx: &TransferContext, state: &TokenState, _plan: &mut TransferPlan) -> Result<()> {
        if state.launched {
            return Ok(());
        }
        if state.is_excluded_from_limits(ctx.from) || state.is_excluded_from_limits(ctx.to) {
            return Ok(());
        }
        Err(TokenError::TradingNotActive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::*;

    #[test]
    fn test_paused_rejects() {
        let mut state = launched_state();
        let mut plan = TransferPlan::default();
        assert!(PauseGate.apply(&ctx(&state, 1, 2, 1, 1), &state, &mut plan).is_ok());

        state.paused = true;
        assert_eq!(
            PauseGate.apply(&ctx(&state, 1, 2, 1, 1), &state, &mut plan),
            Err(TokenError::EnforcedPause)
        );
    }

    #[test]
    fn test_pre_launch_requires_exempt_party() {
        let mut state = launched_state();
        state.launched = false;
        let mut plan = TransferPlan::default();

        assert_eq!(
            LaunchGate.apply(&ctx(&state, 1, 2, 1, 1), &state, &mut plan),
            Err(TokenError::TradingNotActive)
        );
        // token contract is exempt, either side is enough
        assert!(LaunchGate.apply(&ctx(&state, TOKEN, 2, 1, 1), &state, &mut plan).is_ok());
        assert!(LaunchGate.apply(&ctx(&state, 1, TOKEN, 1, 1), &state, &mut plan).is_ok());
    }
}
