mod common;

use common::*;
use tax_token_sim::{ConstantProductRouter, Role, SwapRouter, TokenError, TokenEvent};

#[test]
fn test_pre_launch_transfers_need_exempt_party() {
    let mut token = deploy();
    // owner is exempt
    token.transfer(owner(), alice(), u(1_000)).unwrap();
    assert_eq!(token.balance_of(alice()), u(1_000));

    assert_eq!(token.transfer(alice(), bob(), u(10)), Err(TokenError::TradingNotActive));

    // sending to an exempt wallet is allowed
    token.transfer(alice(), treasury(), u(10)).unwrap();
    assert_eq!(token.balance_of(treasury()), u(10));
}

#[test]
fn test_owner_transfers_are_untaxed_before_launch() {
    let mut token = deploy();
    token.transfer(owner(), alice(), u(100_000)).unwrap();
    assert_eq!(token.balance_of(alice()), u(100_000));
    assert!(token.state().contract_balance().is_zero());
}

#[test]
fn test_launch_seeds_pair_and_sends_lp_to_treasury() {
    let token = launched();
    let pair = pair(&token);

    assert!(token.state().launched);
    assert_eq!(token.state().launch_block, Some(token.env().number));
    assert_eq!(pair, ConstantProductRouter::pair_address_for(router_address(), token_address()));
    assert_eq!(token.balance_of(pair), u(LAUNCH_TOKENS));
    assert_eq!(token.router().reserves(), (u(LAUNCH_TOKENS), u(LAUNCH_NATIVE)));
    // sqrt(5M * 5M) - 1000 locked
    assert_eq!(token.router().lp_balance_of(treasury()), u(4_999_000));
    assert!(token.native().balance_of(owner()).is_zero());
    assert!(matches!(token.events().last(), Some(TokenEvent::Launched { .. })));
    assert_consistent(&token);
}

#[test]
fn test_launch_requires_manager() {
    let mut token = deploy();
    token.transfer(owner(), token_address(), u(LAUNCH_TOKENS)).unwrap();
    token.native_mut().mint(alice(), u(LAUNCH_NATIVE));
    assert_eq!(
        token.launch(alice(), u(LAUNCH_TOKENS), u(LAUNCH_NATIVE)),
        Err(TokenError::MissingRole { account: alice(), role: Role::Manager })
    );
}

#[test]
fn test_launch_only_once() {
    let mut token = launched();
    token.native_mut().mint(owner(), u(10));
    assert_eq!(token.launch(owner(), u(1), u(1)), Err(TokenError::AlreadyLaunched));
}

#[test]
fn test_launch_checks_balances() {
    let mut token = deploy();
    token.native_mut().mint(owner(), u(LAUNCH_NATIVE));
    assert!(matches!(
        token.launch(owner(), u(LAUNCH_TOKENS), u(LAUNCH_NATIVE)),
        Err(TokenError::InsufficientBalance { .. })
    ));

    token.transfer(owner(), token_address(), u(LAUNCH_TOKENS)).unwrap();
    assert!(matches!(
        token.launch(owner(), u(LAUNCH_TOKENS), u(LAUNCH_NATIVE + 1)),
        Err(TokenError::InsufficientNative { .. })
    ));

    // nothing leaked from the failed attempts
    assert!(!token.state().launched);
    assert!(token.state().pair.is_none());
    assert!(token.router().pair().is_none());
    assert_eq!(token.native().balance_of(owner()), u(LAUNCH_NATIVE));
}

#[test]
fn test_router_locked_after_launch() {
    let mut pre = deploy();
    pre.set_router(owner(), ConstantProductRouter::new(addr(0xA1))).unwrap();
    assert_eq!(pre.state().router, addr(0xA1));
    assert_eq!(
        pre.set_router(owner(), ConstantProductRouter::new(common::addr(0))),
        Err(TokenError::ZeroAddress("router"))
    );

    let mut token = launched();
    assert_eq!(
        token.set_router(owner(), ConstantProductRouter::new(addr(0xA1))),
        Err(TokenError::RouterLocked)
    );
}

#[test]
fn test_trading_opens_after_launch() {
    let mut token = launched();
    token.transfer(owner(), alice(), u(1_000)).unwrap();
    // 1% transfer tax
    token.transfer(alice(), bob(), u(1_000)).unwrap();
    assert_eq!(token.balance_of(bob()), u(990));
    assert_eq!(token.state().contract_balance(), u(10));
}
