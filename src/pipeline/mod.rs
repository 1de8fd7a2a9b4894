//! Transfer hook
//!
//! Every token movement passes through an ordered list of stages. Each stage
//! sees the same `(from, to, amount)` context and the read-only token state,
//! and either rejects the transfer or adds to the [`TransferPlan`] that the
//! token executes afterwards.

mod gates;
mod blacklist;
mod limits;
mod tax;
mod swap_trigger;

pub use gates::{LaunchGate, PauseGate};
pub use blacklist::BlacklistStage;
pub use limits::LimitStage;
pub use tax::TaxStage;
pub use swap_trigger::SwapTrigger;

use std::sync::Arc;

use ethers::types::{Address, U256};

use crate::core::{TokenState, TransferStage};
use crate::models::TransferKind;
use crate::utils::Result;

/// The movement under inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferContext {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub kind: TransferKind,
    pub block: u64,
}

impl TransferContext {
    pub fn new(state: &TokenState, from: Address, to: Address, amount: U256, block: u64) -> Self {
        Self {
            from,
            to,
            amount,
            kind: TransferKind::classify(from, to, state.pair),
            block,
        }
    }
}

/// What the token has to do to carry out a transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    /// Withheld from the receiver and credited to the token contract
    pub tax: U256,
    /// Contract tokens to sell before the transfer itself
    pub swap_back: Option<U256>,
}

impl TransferPlan {
    pub fn net_amount(&self, amount: U256) -> U256 {
        amount.saturating_sub(self.tax)
    }
}

#[derive(Clone)]
pub struct TransferPipeline {
    stages: Vec<Arc<dyn TransferStage>>,
}

impl TransferPipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn add_stage(mut self, stage: Arc<dyn TransferStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// pause -> launch gate -> blacklist -> limits -> tax -> swap trigger
    pub fn standard() -> Self {
        Self::new()
            .add_stage(Arc::new(PauseGate))
            .add_stage(Arc::new(LaunchGate))
            .add_stage(Arc::new(BlacklistStage))
            .add_stage(Arc::new(LimitStage))
            .add_stage(Arc::new(TaxStage))
            .add_stage(Arc::new(SwapTrigger))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order; the first error aborts.
    pub fn evaluate(&self, ctx: &TransferContext, state: &TokenState) -> Result<TransferPlan> {
        let mut plan = TransferPlan::default();
        for stage in &self.stages {
            if let Err(e) = stage.apply(ctx, state, &mut plan) {
                tracing::debug!("Stage '{}' rejected {:?} -> {:?}: {}", stage.name(), ctx.from, ctx.to, e);
                return Err(e);
            }
        }
        tracing::debug!(
            "{:?} transfer of {} planned: tax {}, swap back {:?}",
            ctx.kind, ctx.amount, plan.tax, plan.swap_back
        );
        Ok(plan)
    }
}

impl Default for TransferPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for TransferPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
