use std::collections::BTreeMap;

use ethers::types::U256;
use serde::{Deserialize, Serialize};

use crate::utils::{amount_serde, format_token_amount};

/// Result of one scenario step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub index: usize,
    pub action: String,
    pub block: u64,
    /// Error the call reverted with, if any
    pub error: Option<String>,
    pub expected_error: Option<String>,
    /// Whether the outcome matched the expectation
    pub passed: bool,
    /// Names of the events the step emitted
    pub events: Vec<String>,
}

/// Ledger position of a scenario actor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorBalance {
    #[serde(with = "amount_serde")]
    pub tokens: U256,
    #[serde(with = "amount_serde")]
    pub native: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub steps: Vec<StepOutcome>,
    pub balances: BTreeMap<String, ActorBalance>,
    #[serde(with = "amount_serde")]
    pub total_supply: U256,
    #[serde(with = "amount_serde")]
    pub contract_tokens: U256,
    pub swap_backs: usize,
    pub launched: bool,
    pub final_block: u64,
    pub supply_conserved: bool,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.supply_conserved && self.steps.iter().all(|s| s.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| !s.passed)
    }
}

impl std::fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "              SCENARIO REPORT: {}", self.name)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f)?;

        writeln!(f, "═══ STEPS ═══")?;
        for step in &self.steps {
            let mark = if step.passed { "✅" } else { "❌" };
            match &step.error {
                Some(error) => writeln!(f, "{} #{:<3} [block {}] {} -> reverted: {}", mark, step.index, step.block, step.action, error)?,
                None => writeln!(f, "{} #{:<3} [block {}] {} ({} events)", mark, step.index, step.block, step.action, step.events.len())?,
            }
            if !step.passed {
                if let Some(expected) = &step.expected_error {
                    writeln!(f, "        expected revert: {}", expected)?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "═══ BALANCES ═══")?;
        for (actor, balance) in &self.balances {
            writeln!(
                f,
                "{:<12} {:>24} tokens {:>20} native",
                actor,
                format_token_amount(balance.tokens),
                format_token_amount(balance.native)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Launched: {}", if self.launched { "yes" } else { "no" })?;
        writeln!(f, "Swap backs: {}", self.swap_backs)?;
        writeln!(f, "Contract tax balance: {}", format_token_amount(self.contract_tokens))?;
        writeln!(f, "Total supply: {}", format_token_amount(self.total_supply))?;
        writeln!(f, "Final block: {}", self.final_block)?;
        writeln!(f)?;

        let verdict = if self.passed() { "🟢 ALL EXPECTATIONS MET" } else { "🔴 EXPECTATIONS FAILED" };
        writeln!(f, "{}", verdict)?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        Ok(())
    }
}
