use std::collections::{HashMap, HashSet};

use ethers::types::{Address, U256};

use crate::utils::{Result, TokenError};

/// Native-currency balances, including accounts whose receive hook reverts
#[derive(Debug, Clone, Default)]
pub struct NativeLedger {
    balances: HashMap<Address, U256>,
    rejecting: HashSet<Address>,
}

impl NativeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Create native currency out of thin air (test faucet).
    pub fn mint(&mut self, account: Address, amount: U256) {
        let balance = self.balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Mark `account` as a contract without a payable receive function.
    pub fn set_rejecting(&mut self, account: Address, rejecting: bool) {
        if rejecting {
            self.rejecting.insert(account);
        } else {
            self.rejecting.remove(&account);
        }
    }

    pub fn debit(&mut self, account: Address, amount: U256) -> Result<()> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(TokenError::InsufficientNative { account, balance, needed: amount });
        }
        self.balances.insert(account, balance - amount);
        Ok(())
    }

    /// Fails with `NativeTransferFailed` when the recipient rejects value.
    pub fn credit(&mut self, account: Address, amount: U256) -> Result<()> {
        if self.rejecting.contains(&account) && !amount.is_zero() {
            return Err(TokenError::NativeTransferFailed(account));
        }
        self.mint(account, amount);
        Ok(())
    }

    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        if self.rejecting.contains(&to) && !amount.is_zero() {
            return Err(TokenError::NativeTransferFailed(to));
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }
}
