use std::collections::HashMap;

use ethers::types::{Address, U256};

use crate::access::AccessControl;
use crate::models::{AccountFlags, Fees, Limits};
use crate::storage::{pack_account_flags, pack_fee_config, pack_limits, slots, ConfigFlags, StorageSnapshot};

/// Proxy bookkeeping for the upgradeable deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyState {
    pub implementation: Address,
    pub version: u64,
}

/// Persistent storage of the token contract
///
/// Everything a transfer stage is allowed to look at lives here; the router,
/// block environment and native ledger are held next to it by the token.
#[derive(Debug, Clone)]
pub struct TokenState {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Address of the token contract itself (tax is collected here)
    pub address: Address,
    pub total_supply: U256,

    pub fees: Fees,
    pub limits: Limits,
    pub limits_enabled: bool,
    pub taxes_enabled: bool,
    pub launched: bool,
    pub paused: bool,

    pub router: Address,
    pub pair: Option<Address>,
    pub operations_wallet: Address,
    pub treasury_wallet: Address,

    pub swap_tokens_at_amount: U256,
    pub last_swap_back_block: u64,
    pub launch_block: Option<u64>,
    pub operations_share_bps: u16,
    pub swap_slippage_bps: u16,
    /// Set while the contract sells its own tax
    pub in_swap_back: bool,

    pub roles: AccessControl,
    pub proxy: ProxyState,

    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    nonces: HashMap<Address, U256>,
    account_flags: HashMap<Address, AccountFlags>,
}

impl TokenState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        symbol: String,
        decimals: u8,
        address: Address,
        fees: Fees,
        limits: Limits,
        router: Address,
        operations_wallet: Address,
        treasury_wallet: Address,
        implementation: Address,
    ) -> Self {
        Self {
            name,
            symbol,
            decimals,
            address,
            total_supply: U256::zero(),
            fees,
            limits,
            limits_enabled: true,
            taxes_enabled: true,
            launched: false,
            paused: false,
            router,
            pair: None,
            operations_wallet,
            treasury_wallet,
            swap_tokens_at_amount: U256::zero(),
            last_swap_back_block: 0,
            launch_block: None,
            operations_share_bps: 0,
            swap_slippage_bps: 0,
            in_swap_back: false,
            roles: AccessControl::new(),
            proxy: ProxyState { implementation, version: 1 },
            balances: HashMap::new(),
            allowances: HashMap::new(),
            nonces: HashMap::new(),
            account_flags: HashMap::new(),
        }
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    pub fn set_balance(&mut self, account: Address, amount: U256) {
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or_default()
    }

    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    pub fn nonce_of(&self, owner: Address) -> U256 {
        self.nonces.get(&owner).copied().unwrap_or_default()
    }

    /// Returns the nonce that was consumed.
    pub fn use_nonce(&mut self, owner: Address) -> U256 {
        let nonce = self.nonces.entry(owner).or_default();
        let current = *nonce;
        *nonce = current + U256::one();
        current
    }

    pub fn flags(&self, account: Address) -> AccountFlags {
        self.account_flags.get(&account).copied().unwrap_or_default()
    }

    pub fn update_flags(&mut self, account: Address, edit: impl FnOnce(&mut AccountFlags)) {
        let mut flags = self.flags(account);
        edit(&mut flags);
        if flags == AccountFlags::default() {
            self.account_flags.remove(&account);
        } else {
            self.account_flags.insert(account, flags);
        }
    }

    pub fn is_excluded_from_limits(&self, account: Address) -> bool {
        self.flags(account).excluded_from_limits
    }

    pub fn is_excluded_from_tax(&self, account: Address) -> bool {
        self.flags(account).excluded_from_tax
    }

    pub fn is_blocked(&self, account: Address) -> bool {
        self.flags(account).blocked
    }

    /// Tax tokens waiting to be sold
    pub fn contract_balance(&self) -> U256 {
        self.balance_of(self.address)
    }

    pub fn holders(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter()
    }

    /// Sum of every ledger balance; equals `total_supply` at rest.
    pub fn circulating(&self) -> U256 {
        self.balances.values().fold(U256::zero(), |acc, v| acc.saturating_add(*v))
    }

    pub fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            limits_enabled: self.limits_enabled,
            taxes_enabled: self.taxes_enabled,
            launched: self.launched,
        }
    }

    /// Render the state as the packed EVM storage words it corresponds to.
    pub fn storage_snapshot(&self) -> StorageSnapshot {
        let mut snapshot = StorageSnapshot::new();
        snapshot.write(U256::from(slots::TOTAL_SUPPLY), self.total_supply);
        snapshot.write(U256::from(slots::FEE_CONFIG), pack_fee_config(&self.fees, &self.config_flags()));

        let [trade, wallet] = pack_limits(&self.limits, self.last_swap_back_block);
        snapshot.write(U256::from(slots::TRADE_LIMITS), trade);
        snapshot.write(U256::from(slots::WALLET_LIMIT), wallet);
        snapshot.write(U256::from(slots::SWAP_THRESHOLD), self.swap_tokens_at_amount);

        for (account, balance) in &self.balances {
            snapshot.write(StorageSnapshot::balance_slot(*account), *balance);
        }
        for ((owner, spender), amount) in &self.allowances {
            snapshot.write(StorageSnapshot::allowance_slot(*owner, *spender), *amount);
        }
        for (account, flags) in &self.account_flags {
            snapshot.write(StorageSnapshot::account_flags_slot(*account), pack_account_flags(flags));
        }
        for (owner, nonce) in &self.nonces {
            snapshot.write(StorageSnapshot::nonce_slot(*owner), *nonce);
        }
        snapshot
    }
}
