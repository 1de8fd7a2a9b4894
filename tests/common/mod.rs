#![allow(dead_code)]

use ethers::types::{Address, U256};
use tax_token_sim::models::{Fees, TokenConfig};
use tax_token_sim::{ConstantProductRouter, Deployment, SwapRouter, TaxToken};

pub const SUPPLY: u64 = 10_000_000;
pub const LAUNCH_TOKENS: u64 = 5_000_000;
pub const LAUNCH_NATIVE: u64 = 5_000_000;

pub fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

pub fn owner() -> Address {
    addr(0x01)
}
pub fn operations() -> Address {
    addr(0x0B)
}
pub fn treasury() -> Address {
    addr(0x0C)
}
pub fn token_address() -> Address {
    addr(0x70)
}
pub fn router_address() -> Address {
    addr(0xA0)
}
pub fn alice() -> Address {
    addr(0x11)
}
pub fn bob() -> Address {
    addr(0x12)
}
pub fn carol() -> Address {
    addr(0x13)
}

pub fn u(n: u64) -> U256 {
    U256::from(n)
}

pub fn deployment() -> Deployment {
    Deployment {
        token: token_address(),
        owner: owner(),
        operations_wallet: operations(),
        treasury_wallet: treasury(),
        implementation: addr(0x1F),
    }
}

/// Raw-unit config: 5% buy, 10% sell, 1% transfer; 100k max buy/sell,
/// 200k max wallet, 10k swap threshold, 50/50 proceeds split.
pub fn config() -> TokenConfig {
    TokenConfig {
        total_supply: u(SUPPLY),
        fees: Fees { buy: 500, sell: 1_000, transfer: 100 },
        max_buy: u(100_000),
        max_sell: u(100_000),
        max_wallet: u(200_000),
        swap_tokens_at_amount: u(10_000),
        ..TokenConfig::default()
    }
}

pub fn deploy() -> TaxToken {
    TaxToken::initialize(&config(), deployment(), ConstantProductRouter::new(router_address()))
        .expect("deploy")
}

/// Deployed and launched with 5M tokens / 5M native; owner keeps the other 5M.
pub fn launched() -> TaxToken {
    let mut token = deploy();
    token.transfer(owner(), token_address(), u(LAUNCH_TOKENS)).expect("fund contract");
    token.native_mut().mint(owner(), u(LAUNCH_NATIVE));
    token.launch(owner(), u(LAUNCH_TOKENS), u(LAUNCH_NATIVE)).expect("launch");
    token
}

pub fn pair(token: &TaxToken) -> Address {
    token.state().pair.expect("pair")
}

/// Pair ledger balance matches the router reserve and balances sum to supply.
pub fn assert_consistent(token: &TaxToken) {
    let state = token.state();
    assert_eq!(state.circulating(), state.total_supply, "supply not conserved");
    if let Some(pair) = state.pair {
        assert_eq!(token.balance_of(pair), token.router().reserves().0, "pair out of sync with reserves");
    }
}
