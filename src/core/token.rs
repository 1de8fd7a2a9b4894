use ethers::types::{Address, Signature, H256, U256};

use crate::access::Role;
use crate::chain::{BlockEnv, NativeLedger};
use crate::constants::PERMIT_VERSION;
use crate::core::{SwapRouter, TokenState};
use crate::exchange::ConstantProductRouter;
use crate::models::{TokenConfig, TokenEvent};
use crate::permit::{self, PermitMessage};
use crate::pipeline::{TransferContext, TransferPipeline};
use crate::utils::{Result, TokenError};

/// Addresses fixed at deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    /// Proxy address; the token's public address
    pub token: Address,
    pub owner: Address,
    pub operations_wallet: Address,
    pub treasury_wallet: Address,
    pub implementation: Address,
}

/// The upgradeable tax token together with the chain it runs on
///
/// Every public mutating call is a transaction: it either completes or leaves
/// the token, router and native ledger exactly as they were.
#[derive(Debug, Clone)]
pub struct TaxToken<R: SwapRouter = ConstantProductRouter> {
    pub(crate) state: TokenState,
    pub(crate) router: R,
    pub(crate) env: BlockEnv,
    pub(crate) native: NativeLedger,
    events: Vec<TokenEvent>,
    pipeline: TransferPipeline,
}

impl<R: SwapRouter> TaxToken<R> {
    /// Deploy and initialise the proxy.
    pub fn initialize(config: &TokenConfig, deployment: Deployment, router: R) -> Result<Self> {
        config.validate()?;
        for (label, address) in [
            ("token", deployment.token),
            ("owner", deployment.owner),
            ("operations wallet", deployment.operations_wallet),
            ("treasury wallet", deployment.treasury_wallet),
            ("implementation", deployment.implementation),
            ("router", router.address()),
        ] {
            if address.is_zero() {
                return Err(TokenError::ZeroAddress(label));
            }
        }

        let mut state = TokenState::new(
            config.name.clone(),
            config.symbol.clone(),
            config.decimals,
            deployment.token,
            config.fees,
            config.limits()?,
            router.address(),
            deployment.operations_wallet,
            deployment.treasury_wallet,
            deployment.implementation,
        );
        state.limits_enabled = config.limits_enabled;
        state.taxes_enabled = config.taxes_enabled;
        state.swap_tokens_at_amount = config.swap_tokens_at_amount;
        state.operations_share_bps = config.operations_share_bps;
        state.swap_slippage_bps = config.swap_slippage_bps;

        let mut token = Self {
            state,
            router,
            env: BlockEnv::new(config.chain_id),
            native: NativeLedger::new(),
            events: Vec::new(),
            pipeline: TransferPipeline::standard(),
        };

        for role in Role::ALL {
            token.state.roles.grant(role, deployment.owner);
            token.emit(TokenEvent::RoleGranted { role, account: deployment.owner, sender: deployment.owner });
        }
        for account in [
            deployment.token,
            deployment.owner,
            deployment.operations_wallet,
            deployment.treasury_wallet,
        ] {
            token.state.update_flags(account, |f| {
                f.excluded_from_limits = true;
                f.excluded_from_tax = true;
            });
        }

        token.state.total_supply = config.total_supply;
        token.state.set_balance(deployment.owner, config.total_supply);
        token.emit(TokenEvent::Transfer {
            from: Address::zero(),
            to: deployment.owner,
            value: config.total_supply,
        });

        tracing::info!(
            "🚀 Initialized {} ({}) at {:?}, supply {} minted to {:?}",
            token.state.name, token.state.symbol, deployment.token, config.total_supply, deployment.owner
        );
        Ok(token)
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn env(&self) -> &BlockEnv {
        &self.env
    }

    pub fn native(&self) -> &NativeLedger {
        &self.native
    }

    /// Direct access for funding accounts and flagging contracts that reject value.
    pub fn native_mut(&mut self) -> &mut NativeLedger {
        &mut self.native
    }

    pub fn address(&self) -> Address {
        self.state.address
    }

    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    pub fn pipeline(&self) -> &TransferPipeline {
        &self.pipeline
    }

    pub fn advance_blocks(&mut self, blocks: u64) {
        self.env.advance(blocks);
    }

    // ------------------------------------------------------------------
    // ERC20
    // ------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn symbol(&self) -> &str {
        &self.state.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.state.decimals
    }

    pub fn total_supply(&self) -> U256 {
        self.state.total_supply
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.state.balance_of(account)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.state.allowance(owner, spender)
    }

    pub fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<()> {
        self.atomically(|t| t.transfer_internal(caller, to, amount))
    }

    pub fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> Result<()> {
        self.atomically(|t| t.approve_internal(caller, spender, amount))
    }

    pub fn transfer_from(&mut self, caller: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        self.atomically(|t| {
            t.spend_allowance(from, caller, amount)?;
            t.transfer_internal(from, to, amount)
        })
    }

    // ------------------------------------------------------------------
    // EIP-2612
    // ------------------------------------------------------------------

    pub fn nonces(&self, owner: Address) -> U256 {
        self.state.nonce_of(owner)
    }

    pub fn domain_separator(&self) -> H256 {
        permit::domain_separator(&self.state.name, PERMIT_VERSION, self.env.chain_id, self.state.address)
    }

    /// Approve `spender` on behalf of `owner` with an off-chain signature.
    pub fn permit(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        signature: &Signature,
    ) -> Result<()> {
        self.atomically(|t| {
            let now = t.env.timestamp;
            if U256::from(now) > deadline {
                return Err(TokenError::PermitExpired { deadline, now });
            }
            let nonce = t.state.use_nonce(owner);
            let message = PermitMessage { owner, spender, value, nonce, deadline };
            let signer = permit::recover_signer(message.digest(t.domain_separator()), signature)?;
            if signer != owner {
                tracing::warn!("Permit for {:?} signed by {:?}", owner, signer);
                return Err(TokenError::InvalidSigner { signer, owner });
            }
            t.approve_internal(owner, spender, value)
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Run `op` as one transaction, restoring every ledger on error.
    pub(crate) fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.clone();
        let result = op(self);
        if let Err(e) = &result {
            tracing::debug!("Reverted: {}", e);
            *self = snapshot;
        }
        result
    }

    pub(crate) fn emit(&mut self, event: TokenEvent) {
        self.events.push(event);
    }

    pub(crate) fn require_role(&self, role: Role, caller: Address) -> Result<()> {
        self.state.roles.check_role(role, caller)
    }

    /// Raw ledger movement; no hook.
    pub(crate) fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        let balance = self.state.balance_of(from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance { account: from, balance, needed: amount });
        }
        self.state.set_balance(from, balance - amount);
        let receiver = self.state.balance_of(to);
        self.state.set_balance(to, receiver.checked_add(amount).ok_or(TokenError::Overflow)?);
        self.emit(TokenEvent::Transfer { from, to, value: amount });
        Ok(())
    }

    /// Hooked transfer: evaluate the pipeline, sell tax if planned, then move
    /// the net amount and the tax.
    pub(crate) fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        if from.is_zero() {
            return Err(TokenError::InvalidSender(from));
        }
        if to.is_zero() {
            return Err(TokenError::InvalidReceiver(to));
        }

        let ctx = TransferContext::new(&self.state, from, to, amount, self.env.number);
        let plan = self.pipeline.evaluate(&ctx, &self.state)?;

        if let Some(swap_amount) = plan.swap_back {
            self.swap_back(swap_amount)?;
        }

        let balance = self.state.balance_of(from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance { account: from, balance, needed: amount });
        }
        self.move_balance(from, to, plan.net_amount(amount))?;
        if !plan.tax.is_zero() {
            let contract = self.state.address;
            self.move_balance(from, contract, plan.tax)?;
        }
        Ok(())
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) -> Result<()> {
        if owner.is_zero() {
            return Err(TokenError::ZeroAddress("approver"));
        }
        if spender.is_zero() {
            return Err(TokenError::ZeroAddress("spender"));
        }
        self.state.set_allowance(owner, spender, amount);
        self.emit(TokenEvent::Approval { owner, spender, value: amount });
        Ok(())
    }

    /// An allowance of `U256::MAX` is never decreased.
    fn spend_allowance(&mut self, owner: Address, spender: Address, amount: U256) -> Result<()> {
        let allowance = self.state.allowance(owner, spender);
        if allowance == U256::MAX {
            return Ok(());
        }
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance { spender, allowance, needed: amount });
        }
        self.state.set_allowance(owner, spender, allowance - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment() -> Deployment {
        Deployment {
            token: Address::from_low_u64_be(0x70),
            owner: Address::from_low_u64_be(0x01),
            operations_wallet: Address::from_low_u64_be(0x0B),
            treasury_wallet: Address::from_low_u64_be(0x0C),
            implementation: Address::from_low_u64_be(0x1F),
        }
    }

    fn token() -> TaxToken {
        let router = ConstantProductRouter::new(Address::from_low_u64_be(0xA0));
        TaxToken::initialize(&TokenConfig::default(), deployment(), router).unwrap()
    }

    #[test]
    fn test_initialize_mints_and_grants() {
        let token = token();
        let owner = deployment().owner;
        assert_eq!(token.balance_of(owner), token.total_supply());
        for role in Role::ALL {
            assert!(token.state().roles.has_role(role, owner));
        }
        for account in [owner, deployment().token, deployment().treasury_wallet, deployment().operations_wallet] {
            assert!(token.state().is_excluded_from_limits(account));
            assert!(token.state().is_excluded_from_tax(account));
        }
    }

    #[test]
    fn test_initialize_rejects_zero_wallet() {
        let mut d = deployment();
        d.treasury_wallet = Address::zero();
        let router = ConstantProductRouter::new(Address::from_low_u64_be(0xA0));
        assert_eq!(
            TaxToken::initialize(&TokenConfig::default(), d, router).unwrap_err(),
            TokenError::ZeroAddress("treasury wallet")
        );
    }

    #[test]
    fn test_failed_call_leaves_no_trace() {
        let mut token = token();
        let owner = deployment().owner;
        let events = token.events().len();
        let supply = token.total_supply();

        let err = token.transfer(owner, deployment().treasury_wallet, supply + 1).unwrap_err();
        assert!(matches!(err, TokenError::InsufficientBalance { .. }));
        assert_eq!(token.events().len(), events);
        assert_eq!(token.balance_of(owner), supply);
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut token = token();
        let owner = deployment().owner;
        let spender = Address::from_low_u64_be(5);
        token.approve(owner, spender, U256::from(100)).unwrap();
        token.transfer_from(spender, owner, spender, U256::from(60)).unwrap();
        assert_eq!(token.allowance(owner, spender), U256::from(40));
        assert!(matches!(
            token.transfer_from(spender, owner, spender, U256::from(41)),
            Err(TokenError::InsufficientAllowance { .. })
        ));
    }

    #[test]
    fn test_zero_receiver_rejected() {
        let mut token = token();
        assert_eq!(
            token.transfer(deployment().owner, Address::zero(), U256::one()),
            Err(TokenError::InvalidReceiver(Address::zero()))
        );
    }
}
