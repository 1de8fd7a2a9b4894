//! Role-gated administration

use ethers::types::{Address, U256};

use crate::access::Role;
use crate::constants::{BPS_DENOMINATOR, MAX_BATCH_SIZE};
use crate::core::{SwapRouter, TaxToken};
use crate::models::{Fees, Limits, TokenEvent};
use crate::utils::{Result, TokenError};

fn check_batch(accounts: &[Address]) -> Result<()> {
    if accounts.len() > MAX_BATCH_SIZE {
        return Err(TokenError::BatchTooLarge(accounts.len()));
    }
    if accounts.iter().any(|a| a.is_zero()) {
        return Err(TokenError::ZeroAddress("account"));
    }
    Ok(())
}

impl<R: SwapRouter> TaxToken<R> {
    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    pub fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Admin, caller)?;
            if account.is_zero() {
                return Err(TokenError::ZeroAddress("account"));
            }
            if t.state.roles.grant(role, account) {
                tracing::info!("🔑 {} granted to {:?}", role, account);
                t.emit(TokenEvent::RoleGranted { role, account, sender: caller });
            }
            Ok(())
        })
    }

    pub fn revoke_role(&mut self, caller: Address, role: Role, account: Address) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Admin, caller)?;
            if t.state.roles.revoke(role, account) {
                tracing::info!("🔒 {} revoked from {:?}", role, account);
                t.emit(TokenEvent::RoleRevoked { role, account, sender: caller });
            }
            Ok(())
        })
    }

    /// Drop one of the caller's own roles.
    pub fn renounce_role(&mut self, caller: Address, role: Role) -> Result<()> {
        self.atomically(|t| {
            if t.state.roles.revoke(role, caller) {
                tracing::info!("🔒 {:?} renounced {}", caller, role);
                t.emit(TokenEvent::RoleRevoked { role, account: caller, sender: caller });
            }
            Ok(())
        })
    }

    pub fn pause(&mut self, caller: Address) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Admin, caller)?;
            if t.state.paused {
                return Err(TokenError::EnforcedPause);
            }
            t.state.paused = true;
            tracing::warn!("⏸️  Token paused by {:?}", caller);
            t.emit(TokenEvent::Paused { account: caller });
            Ok(())
        })
    }

    pub fn unpause(&mut self, caller: Address) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Admin, caller)?;
            if !t.state.paused {
                return Err(TokenError::ExpectedPause);
            }
            t.state.paused = false;
            tracing::info!("▶️  Token unpaused by {:?}", caller);
            t.emit(TokenEvent::Unpaused { account: caller });
            Ok(())
        })
    }

    /// Send all native currency held by the contract to `to`.
    pub fn rescue_native(&mut self, caller: Address, to: Address) -> Result<U256> {
        self.atomically(|t| {
            t.require_role(Role::Admin, caller)?;
            if to.is_zero() {
                return Err(TokenError::ZeroAddress("to"));
            }
            let token = t.state.address;
            let amount = t.native.balance_of(token);
            t.native.transfer(token, to, amount)?;
            tracing::warn!("🛟 Rescued {} native to {:?}", amount, to);
            t.emit(TokenEvent::NativeRescued { to, amount });
            Ok(amount)
        })
    }

    /// Move tokens held by the contract itself, outside the transfer hook.
    pub fn rescue_tokens(&mut self, caller: Address, to: Address, amount: U256) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Admin, caller)?;
            if to.is_zero() {
                return Err(TokenError::ZeroAddress("to"));
            }
            let token = t.state.address;
            t.move_balance(token, to, amount)?;
            tracing::warn!("🛟 Rescued {} tokens to {:?}", amount, to);
            t.emit(TokenEvent::TokensRescued { to, amount });
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Manager
    // ------------------------------------------------------------------

    pub fn set_limits_enabled(&mut self, caller: Address, enabled: bool) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            t.state.limits_enabled = enabled;
            t.emit(TokenEvent::LimitsToggled { enabled });
            Ok(())
        })
    }

    pub fn set_taxes_enabled(&mut self, caller: Address, enabled: bool) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            t.state.taxes_enabled = enabled;
            t.emit(TokenEvent::TaxesToggled { enabled });
            Ok(())
        })
    }

    pub fn set_fees(&mut self, caller: Address, buy: u16, sell: u16, transfer: u16) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            let fees = Fees::new(buy, sell, transfer)?;
            t.state.fees = fees;
            tracing::info!("Fees set to buy {} / sell {} / transfer {} bps", buy, sell, transfer);
            t.emit(TokenEvent::FeesUpdated { fees });
            Ok(())
        })
    }

    pub fn set_limits(&mut self, caller: Address, max_buy: U256, max_sell: U256, max_wallet: U256) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            let limits = Limits::from_amounts(max_buy, max_sell, max_wallet)?;
            t.state.limits = limits;
            t.emit(TokenEvent::LimitsUpdated { limits });
            Ok(())
        })
    }

    pub fn set_swap_tokens_at_amount(&mut self, caller: Address, amount: U256) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            if amount.is_zero() || amount > t.state.total_supply {
                return Err(TokenError::InvalidSwapThreshold(amount));
            }
            t.state.swap_tokens_at_amount = amount;
            t.emit(TokenEvent::SwapThresholdUpdated { amount });
            Ok(())
        })
    }

    pub fn set_wallets(&mut self, caller: Address, operations: Address, treasury: Address) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            if operations.is_zero() {
                return Err(TokenError::ZeroAddress("operations wallet"));
            }
            if treasury.is_zero() {
                return Err(TokenError::ZeroAddress("treasury wallet"));
            }
            t.state.operations_wallet = operations;
            t.state.treasury_wallet = treasury;
            t.emit(TokenEvent::WalletsUpdated { operations, treasury });
            Ok(())
        })
    }

    pub fn set_operations_share(&mut self, caller: Address, bps: u16) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            if u64::from(bps) > BPS_DENOMINATOR {
                return Err(TokenError::InvalidShare(bps));
            }
            t.state.operations_share_bps = bps;
            t.emit(TokenEvent::OperationsShareUpdated { bps });
            Ok(())
        })
    }

    /// Replace the router; only possible before launch.
    pub fn set_router(&mut self, caller: Address, router: R) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            if t.state.launched {
                return Err(TokenError::RouterLocked);
            }
            let address = router.address();
            if address.is_zero() {
                return Err(TokenError::ZeroAddress("router"));
            }
            t.state.router = address;
            t.router = router;
            t.emit(TokenEvent::RouterUpdated { router: address });
            Ok(())
        })
    }

    pub fn block_account(&mut self, caller: Address, account: Address) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            if account.is_zero() {
                return Err(TokenError::ZeroAddress("account"));
            }
            let pair = t.state.pair.unwrap_or_else(|| t.router.pair_for(t.state.address));
            if account == t.state.address || account == t.state.router || account == pair {
                return Err(TokenError::CannotBlock(account));
            }
            t.state.update_flags(account, |f| f.blocked = true);
            tracing::warn!("⛔ Blocked {:?}", account);
            t.emit(TokenEvent::AccountBlocked { account, blocked: true });
            Ok(())
        })
    }

    pub fn unblock_account(&mut self, caller: Address, account: Address) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            t.state.update_flags(account, |f| f.blocked = false);
            t.emit(TokenEvent::AccountBlocked { account, blocked: false });
            Ok(())
        })
    }

    pub fn exclude_from_limits(&mut self, caller: Address, account: Address, excluded: bool) -> Result<()> {
        self.exclude_from_limits_batch(caller, &[account], excluded)
    }

    pub fn exclude_from_tax(&mut self, caller: Address, account: Address, excluded: bool) -> Result<()> {
        self.exclude_from_tax_batch(caller, &[account], excluded)
    }

    /// At most 50 accounts; an empty slice is a no-op.
    pub fn exclude_from_limits_batch(&mut self, caller: Address, accounts: &[Address], excluded: bool) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            check_batch(accounts)?;
            for &account in accounts {
                t.state.update_flags(account, |f| f.excluded_from_limits = excluded);
                t.emit(TokenEvent::ExcludedFromLimits { account, excluded });
            }
            Ok(())
        })
    }

    /// At most 50 accounts; an empty slice is a no-op.
    pub fn exclude_from_tax_batch(&mut self, caller: Address, accounts: &[Address], excluded: bool) -> Result<()> {
        self.atomically(|t| {
            t.require_role(Role::Manager, caller)?;
            check_batch(accounts)?;
            for &account in accounts {
                t.state.update_flags(account, |f| f.excluded_from_tax = excluded);
                t.emit(TokenEvent::ExcludedFromTax { account, excluded });
            }
            Ok(())
        })
    }
}
