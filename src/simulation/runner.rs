use std::collections::BTreeMap;

use ethers::types::{Address, U256};

use crate::core::{Deployment, TaxToken};
use crate::exchange::ConstantProductRouter;
use crate::models::{ActorBalance, ScenarioReport, StepOutcome, TokenEvent};
use crate::permit::PermitMessage;
use crate::utils::{SimError, SimResult};

use super::actors::{self, ActorBook};
use super::scenario::{Action, Scenario};

/// A deployed token driven by a scenario
pub struct Simulation {
    scenario: Scenario,
    token: TaxToken,
    actors: ActorBook,
}

impl Simulation {
    /// Deploy the token described by the scenario's config and fund its actors.
    pub fn new(scenario: Scenario) -> SimResult<Self> {
        let mut actors = ActorBook::new();
        let deployment = Deployment {
            token: actors.resolve(actors::TOKEN)?,
            owner: actors.resolve(actors::OWNER)?,
            operations_wallet: actors.resolve(actors::OPERATIONS)?,
            treasury_wallet: actors.resolve(actors::TREASURY)?,
            implementation: actors.resolve(actors::IMPLEMENTATION)?,
        };
        let router = ConstantProductRouter::new(actors.resolve(actors::ROUTER)?);
        let mut token = TaxToken::initialize(&scenario.config, deployment, router)?;

        for funding in &scenario.funding {
            let account = actors.resolve(&funding.actor)?;
            token.native_mut().mint(account, funding.amount);
        }
        for label in &scenario.rejecting {
            let account = actors.resolve(label)?;
            token.native_mut().set_rejecting(account, true);
        }

        Ok(Self { scenario, token, actors })
    }

    pub fn token(&self) -> &TaxToken {
        &self.token
    }

    /// Run every step; reverts are recorded, not propagated.
    pub fn run(mut self) -> SimResult<ScenarioReport> {
        tracing::info!("▶️  Running scenario '{}' ({} steps)", self.scenario.name, self.scenario.steps.len());
        let steps = self.scenario.steps.clone();
        let mut outcomes = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            let events_before = self.token.events().len();
            let result = self.execute(index, &step.action);

            let (error, passed) = match (result, &step.expect_error) {
                (Ok(()), None) => (None, true),
                (Ok(()), Some(_)) => (None, false),
                (Err(SimError::Token(e)), expected) => {
                    let passed = expected.as_deref() == Some(e.kind());
                    (Some(format!("{}: {}", e.kind(), e)), passed)
                }
                (Err(SimError::ExpectationFailed { message, .. }), _) => (Some(message), false),
                (Err(e), _) => return Err(e),
            };
            if !passed {
                tracing::warn!("Step #{} ({}) did not go as expected: {:?}", index, step.action.name(), error);
            }

            outcomes.push(StepOutcome {
                index,
                action: step.action.name().to_string(),
                block: self.token.env().number,
                error,
                expected_error: step.expect_error.clone(),
                passed,
                events: self.token.events()[events_before..]
                    .iter()
                    .map(|e| e.name().to_string())
                    .collect(),
            });
        }

        Ok(self.report(outcomes))
    }

    fn report(&self, steps: Vec<StepOutcome>) -> ScenarioReport {
        let state = self.token.state();
        let balances: BTreeMap<String, ActorBalance> = self
            .actors
            .iter()
            .filter(|(_, address)| !address.is_zero())
            .map(|(label, address)| {
                let balance = ActorBalance {
                    tokens: self.token.balance_of(*address),
                    native: self.token.native().balance_of(*address),
                };
                (label.clone(), balance)
            })
            .collect();

        ScenarioReport {
            name: self.scenario.name.clone(),
            steps,
            balances,
            total_supply: state.total_supply,
            contract_tokens: state.contract_balance(),
            swap_backs: self
                .token
                .events()
                .iter()
                .filter(|e| matches!(e, TokenEvent::SwapBack { .. }))
                .count(),
            launched: state.launched,
            final_block: self.token.env().number,
            supply_conserved: state.circulating() == state.total_supply,
        }
    }

    fn execute(&mut self, index: usize, action: &Action) -> SimResult<()> {
        match action {
            Action::Transfer { from, to, amount } => {
                let (from, to) = (self.actors.resolve(from)?, self.actors.resolve(to)?);
                self.token.transfer(from, to, *amount)?;
            }
            Action::Approve { owner, spender, amount } => {
                let (owner, spender) = (self.actors.resolve(owner)?, self.actors.resolve(spender)?);
                self.token.approve(owner, spender, *amount)?;
            }
            Action::TransferFrom { spender, from, to, amount } => {
                let spender = self.actors.resolve(spender)?;
                let (from, to) = (self.actors.resolve(from)?, self.actors.resolve(to)?);
                self.token.transfer_from(spender, from, to, *amount)?;
            }
            Action::Permit { owner: label, spender, amount, valid_for_secs } => {
                let owner = self.actors.resolve(label)?;
                let spender = self.actors.resolve(spender)?;
                let deadline = U256::from(self.token.env().timestamp.saturating_add(*valid_for_secs));
                let message = PermitMessage {
                    owner,
                    spender,
                    value: *amount,
                    nonce: self.token.nonces(owner),
                    deadline,
                };
                let digest = message.digest(self.token.domain_separator());
                let signature = ActorBook::wallet(label)?
                    .sign_hash(digest)
                    .map_err(|e| SimError::Wallet(e.to_string()))?;
                self.token.permit(owner, spender, *amount, deadline, &signature)?;
            }
            Action::Buy { trader, native, min_out } => {
                let trader = self.actors.resolve(trader)?;
                self.token.buy(trader, *native, *min_out)?;
            }
            Action::Sell { trader, amount, min_out } => {
                let trader = self.actors.resolve(trader)?;
                self.token.sell(trader, *amount, *min_out)?;
            }
            Action::Launch { caller, tokens, native } => {
                let caller = self.actors.resolve(caller)?;
                self.token.launch(caller, *tokens, *native)?;
                if let Some(pair) = self.token.state().pair {
                    self.actors.set_pair(pair);
                }
            }
            Action::ManualSwap { caller, amount } => {
                let caller = self.actors.resolve(caller)?;
                self.token.manual_swap(caller, *amount)?;
            }
            Action::SetFees { caller, buy, sell, transfer } => {
                let caller = self.actors.resolve(caller)?;
                self.token.set_fees(caller, *buy, *sell, *transfer)?;
            }
            Action::SetLimits { caller, max_buy, max_sell, max_wallet } => {
                let caller = self.actors.resolve(caller)?;
                self.token.set_limits(caller, *max_buy, *max_sell, *max_wallet)?;
            }
            Action::SetLimitsEnabled { caller, enabled } => {
                let caller = self.actors.resolve(caller)?;
                self.token.set_limits_enabled(caller, *enabled)?;
            }
            Action::SetTaxesEnabled { caller, enabled } => {
                let caller = self.actors.resolve(caller)?;
                self.token.set_taxes_enabled(caller, *enabled)?;
            }
            Action::SetSwapThreshold { caller, amount } => {
                let caller = self.actors.resolve(caller)?;
                self.token.set_swap_tokens_at_amount(caller, *amount)?;
            }
            Action::SetWallets { caller, operations, treasury } => {
                let caller = self.actors.resolve(caller)?;
                let operations = self.actors.resolve(operations)?;
                let treasury = self.actors.resolve(treasury)?;
                self.token.set_wallets(caller, operations, treasury)?;
            }
            Action::SetOperationsShare { caller, bps } => {
                let caller = self.actors.resolve(caller)?;
                self.token.set_operations_share(caller, *bps)?;
            }
            Action::Block { caller, account } => {
                let (caller, account) = (self.actors.resolve(caller)?, self.actors.resolve(account)?);
                self.token.block_account(caller, account)?;
            }
            Action::Unblock { caller, account } => {
                let (caller, account) = (self.actors.resolve(caller)?, self.actors.resolve(account)?);
                self.token.unblock_account(caller, account)?;
            }
            Action::ExcludeFromLimits { caller, accounts, excluded } => {
                let caller = self.actors.resolve(caller)?;
                let accounts = self.actors.resolve_all(accounts)?;
                self.token.exclude_from_limits_batch(caller, &accounts, *excluded)?;
            }
            Action::ExcludeFromTax { caller, accounts, excluded } => {
                let caller = self.actors.resolve(caller)?;
                let accounts = self.actors.resolve_all(accounts)?;
                self.token.exclude_from_tax_batch(caller, &accounts, *excluded)?;
            }
            Action::GrantRole { caller, role, account } => {
                let (caller, account) = (self.actors.resolve(caller)?, self.actors.resolve(account)?);
                self.token.grant_role(caller, *role, account)?;
            }
            Action::RevokeRole { caller, role, account } => {
                let (caller, account) = (self.actors.resolve(caller)?, self.actors.resolve(account)?);
                self.token.revoke_role(caller, *role, account)?;
            }
            Action::Pause { caller } => {
                let caller = self.actors.resolve(caller)?;
                self.token.pause(caller)?;
            }
            Action::Unpause { caller } => {
                let caller = self.actors.resolve(caller)?;
                self.token.unpause(caller)?;
            }
            Action::RescueNative { caller, to } => {
                let (caller, to) = (self.actors.resolve(caller)?, self.actors.resolve(to)?);
                self.token.rescue_native(caller, to)?;
            }
            Action::RescueTokens { caller, to, amount } => {
                let (caller, to) = (self.actors.resolve(caller)?, self.actors.resolve(to)?);
                self.token.rescue_tokens(caller, to, *amount)?;
            }
            Action::Upgrade { caller, implementation } => {
                let caller = self.actors.resolve(caller)?;
                let implementation = self.actors.resolve(implementation)?;
                self.token.authorize_upgrade(caller, implementation)?;
            }
            Action::AdvanceBlocks { blocks } => {
                self.token.advance_blocks(*blocks);
            }
            Action::ExpectBalance { account, amount } => {
                let address = self.actors.resolve(account)?;
                let actual = self.token.balance_of(address);
                expect_eq(index, account, "token balance", actual, *amount)?;
            }
            Action::ExpectNative { account, amount } => {
                let address = self.actors.resolve(account)?;
                let actual = self.token.native().balance_of(address);
                expect_eq(index, account, "native balance", actual, *amount)?;
            }
        }
        Ok(())
    }
}

fn expect_eq(step: usize, account: &str, what: &str, actual: U256, expected: U256) -> SimResult<()> {
    if actual != expected {
        return Err(SimError::ExpectationFailed {
            step,
            message: format!("{} of {} is {}, expected {}", what, account, actual, expected),
        });
    }
    Ok(())
}

/// Deterministic address of a scenario label, as the runner resolves it.
pub fn actor_address(label: &str) -> SimResult<Address> {
    ActorBook::new().resolve(label)
}
