mod common;

use common::*;
use ethers::types::Address;
use tax_token_sim::{Role, SwapRouter, TokenError, TokenEvent};

#[test]
fn test_role_management() {
    let mut token = deploy();
    assert_eq!(
        token.set_fees(alice(), 100, 100, 100),
        Err(TokenError::MissingRole { account: alice(), role: Role::Manager })
    );

    token.grant_role(owner(), Role::Manager, alice()).unwrap();
    token.set_fees(alice(), 100, 100, 100).unwrap();
    assert!(matches!(token.events().last(), Some(TokenEvent::FeesUpdated { .. })));

    // managers cannot hand out roles
    assert!(matches!(
        token.grant_role(alice(), Role::Manager, bob()),
        Err(TokenError::MissingRole { role: Role::Admin, .. })
    ));

    token.revoke_role(owner(), Role::Manager, alice()).unwrap();
    assert!(matches!(token.set_fees(alice(), 0, 0, 0), Err(TokenError::MissingRole { .. })));
}

#[test]
fn test_grant_is_idempotent() {
    let mut token = deploy();
    token.grant_role(owner(), Role::Upgrader, alice()).unwrap();
    let events = token.events().len();
    token.grant_role(owner(), Role::Upgrader, alice()).unwrap();
    assert_eq!(token.events().len(), events);
    assert_eq!(
        token.grant_role(owner(), Role::Upgrader, Address::zero()),
        Err(TokenError::ZeroAddress("account"))
    );
}

#[test]
fn test_renounce_role() {
    let mut token = deploy();
    token.renounce_role(owner(), Role::Manager).unwrap();
    assert!(!token.state().roles.has_role(Role::Manager, owner()));
    assert!(token.state().roles.has_role(Role::Admin, owner()));
}

#[test]
fn test_fee_cap_boundary() {
    let mut token = deploy();
    token.set_fees(owner(), 2_000, 2_000, 2_000).unwrap();
    assert_eq!(token.set_fees(owner(), 2_001, 0, 0), Err(TokenError::FeeTooHigh(2_001)));
    assert_eq!(token.state().fees.buy, 2_000);
}

#[test]
fn test_limits_validation() {
    let mut token = deploy();
    token.set_limits(owner(), u(1), u(1), u(1)).unwrap();
    assert_eq!(token.state().limits.max_wallet(), u(1));
    assert_eq!(token.set_limits(owner(), u(0), u(1), u(1)), Err(TokenError::InvalidLimit));
}

#[test]
fn test_swap_threshold_bounds() {
    let mut token = deploy();
    assert_eq!(
        token.set_swap_tokens_at_amount(owner(), u(0)),
        Err(TokenError::InvalidSwapThreshold(u(0)))
    );
    assert_eq!(
        token.set_swap_tokens_at_amount(owner(), u(SUPPLY + 1)),
        Err(TokenError::InvalidSwapThreshold(u(SUPPLY + 1)))
    );
    token.set_swap_tokens_at_amount(owner(), u(SUPPLY)).unwrap();
}

#[test]
fn test_wallet_updates_reject_zero() {
    let mut token = deploy();
    assert_eq!(
        token.set_wallets(owner(), Address::zero(), treasury()),
        Err(TokenError::ZeroAddress("operations wallet"))
    );
    assert_eq!(
        token.set_wallets(owner(), operations(), Address::zero()),
        Err(TokenError::ZeroAddress("treasury wallet"))
    );
    token.set_wallets(owner(), bob(), carol()).unwrap();
    assert_eq!(token.state().operations_wallet, bob());
    assert_eq!(token.state().treasury_wallet, carol());
}

#[test]
fn test_batch_size_cap() {
    let mut token = deploy();
    let fifty: Vec<Address> = (1..=50).map(|i| addr(0x1000 + i)).collect();
    let fifty_one: Vec<Address> = (1..=51).map(|i| addr(0x1000 + i)).collect();

    token.exclude_from_limits_batch(owner(), &fifty, true).unwrap();
    assert!(fifty.iter().all(|a| token.state().is_excluded_from_limits(*a)));

    assert_eq!(
        token.exclude_from_tax_batch(owner(), &fifty_one, true),
        Err(TokenError::BatchTooLarge(51))
    );
    assert!(!token.state().is_excluded_from_tax(fifty[0]));

    let events = token.events().len();
    token.exclude_from_tax_batch(owner(), &[], true).unwrap();
    assert_eq!(token.events().len(), events);
}

#[test]
fn test_cannot_block_infrastructure() {
    let mut token = launched();
    let pair = pair(&token);
    for account in [token_address(), router_address(), pair] {
        assert_eq!(token.block_account(owner(), account), Err(TokenError::CannotBlock(account)));
    }
    token.block_account(owner(), alice()).unwrap();
    assert!(token.state().is_blocked(alice()));
}

#[test]
fn test_cannot_block_pair_before_launch() {
    let mut token = deploy();
    let predicted = token.router().pair_for(token_address());
    assert_eq!(token.block_account(owner(), predicted), Err(TokenError::CannotBlock(predicted)));

    let mut token = launched();
    assert_eq!(pair(&token), predicted);
    assert!(!token.state().is_blocked(predicted));
    assert_eq!(token.block_account(owner(), predicted), Err(TokenError::CannotBlock(predicted)));
}

#[test]
fn test_pause_blocks_all_transfers() {
    let mut token = launched();
    token.transfer(owner(), alice(), u(1_000)).unwrap();

    assert!(matches!(token.pause(alice()), Err(TokenError::MissingRole { .. })));
    token.pause(owner()).unwrap();
    assert_eq!(token.pause(owner()), Err(TokenError::EnforcedPause));

    assert_eq!(token.transfer(alice(), bob(), u(1)), Err(TokenError::EnforcedPause));
    // exempt accounts are paused too
    assert_eq!(token.transfer(owner(), bob(), u(1)), Err(TokenError::EnforcedPause));
    assert_eq!(token.sell(alice(), u(1), u(0)), Err(TokenError::EnforcedPause));

    token.unpause(owner()).unwrap();
    assert_eq!(token.unpause(owner()), Err(TokenError::ExpectedPause));
    token.transfer(alice(), bob(), u(100)).unwrap();
}

#[test]
fn test_rescue_native() {
    let mut token = launched();
    token.native_mut().mint(token_address(), u(777));
    assert!(matches!(token.rescue_native(alice(), alice()), Err(TokenError::MissingRole { .. })));
    assert_eq!(token.rescue_native(owner(), Address::zero()), Err(TokenError::ZeroAddress("to")));

    assert_eq!(token.rescue_native(owner(), carol()).unwrap(), u(777));
    assert_eq!(token.native().balance_of(carol()), u(777));
    assert!(token.native().balance_of(token_address()).is_zero());
}

#[test]
fn test_rescue_tokens_bypasses_hook() {
    let mut token = launched();
    token.transfer(owner(), token_address(), u(5_000)).unwrap();
    token.pause(owner()).unwrap();

    token.rescue_tokens(owner(), carol(), u(4_000)).unwrap();
    assert_eq!(token.balance_of(carol()), u(4_000));
    assert!(matches!(
        token.rescue_tokens(owner(), carol(), u(4_000)),
        Err(TokenError::InsufficientBalance { .. })
    ));
    assert_consistent(&token);
}

#[test]
fn test_upgrade_authorization() {
    let mut token = deploy();
    let v2 = addr(0x2F);
    assert_eq!(token.version(), 1);

    assert_eq!(
        token.authorize_upgrade(alice(), v2),
        Err(TokenError::MissingRole { account: alice(), role: Role::Upgrader })
    );
    assert_eq!(
        token.authorize_upgrade(owner(), Address::zero()),
        Err(TokenError::ZeroAddress("implementation"))
    );

    let balance = token.balance_of(owner());
    assert_eq!(token.authorize_upgrade(owner(), v2).unwrap(), 2);
    assert_eq!(token.implementation(), v2);
    // storage survives the upgrade
    assert_eq!(token.balance_of(owner()), balance);
    assert!(matches!(token.events().last(), Some(TokenEvent::Upgraded { version: 2, .. })));
}

#[test]
fn test_storage_snapshot_tracks_state() {
    use tax_token_sim::storage::{slots, unpack_fee_config, StorageSnapshot};

    let mut token = launched();
    token.set_fees(owner(), 100, 200, 300).unwrap();
    let snapshot = token.state().storage_snapshot();

    let (fees, flags) = unpack_fee_config(snapshot.read(u(slots::FEE_CONFIG)));
    assert_eq!((fees.buy, fees.sell, fees.transfer), (100, 200, 300));
    assert!(flags.launched);
    assert_eq!(snapshot.read(StorageSnapshot::balance_slot(owner())), token.balance_of(owner()));
}
