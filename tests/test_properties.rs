mod common;

use common::*;
use ethers::types::Address;
use proptest::prelude::*;
use tax_token_sim::constants::{MAX_BATCH_SIZE, MAX_FEE_BPS};
use tax_token_sim::TokenError;

#[derive(Debug, Clone)]
enum Op {
    Buy(usize, u64),
    Sell(usize, u8),
    Transfer(usize, usize, u8),
    Advance(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 1..60_000u64).prop_map(|(t, n)| Op::Buy(t, n)),
        (0..3usize, 1..=100u8).prop_map(|(t, pct)| Op::Sell(t, pct)),
        (0..3usize, 0..3usize, 1..=100u8).prop_map(|(a, b, pct)| Op::Transfer(a, b, pct)),
        (1..5u8).prop_map(Op::Advance),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fee_cap(buy in 0..4_000u16, sell in 0..4_000u16, transfer in 0..4_000u16) {
        let mut token = deploy();
        let result = token.set_fees(owner(), buy, sell, transfer);
        let within = buy <= MAX_FEE_BPS && sell <= MAX_FEE_BPS && transfer <= MAX_FEE_BPS;
        prop_assert_eq!(result.is_ok(), within);
        if !within {
            prop_assert!(matches!(result, Err(TokenError::FeeTooHigh(_))));
        }
    }

    #[test]
    fn prop_batch_size(len in 0..120usize) {
        let mut token = deploy();
        let accounts: Vec<Address> = (0..len as u64).map(|i| addr(0x5000 + i)).collect();
        let result = token.exclude_from_limits_batch(owner(), &accounts, true);
        if len <= MAX_BATCH_SIZE {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(TokenError::BatchTooLarge(len)));
        }
    }

    #[test]
    fn prop_trading_conserves_supply(ops in prop::collection::vec(op(), 1..40)) {
        let mut token = launched();
        token.set_swap_tokens_at_amount(owner(), u(2_000)).unwrap();
        let traders = [alice(), bob(), carol()];
        for trader in traders {
            token.native_mut().mint(trader, u(1_000_000));
        }

        for op in ops {
            // reverts are fine; partial state changes are not
            let _ = match op {
                Op::Buy(t, native) => token.buy(traders[t], u(native), u(0)).map(|_| ()),
                Op::Sell(t, pct) => {
                    let amount = token.balance_of(traders[t]) * u(pct.into()) / u(100);
                    token.sell(traders[t], amount, u(0)).map(|_| ())
                }
                Op::Transfer(a, b, pct) => {
                    let amount = token.balance_of(traders[a]) * u(pct.into()) / u(100);
                    token.transfer(traders[a], traders[b], amount)
                }
                Op::Advance(blocks) => {
                    token.advance_blocks(u64::from(blocks));
                    Ok(())
                }
            };
            assert_consistent(&token);
        }
    }

    #[test]
    fn prop_tax_never_exceeds_rate(native in 1..50_000u64) {
        let mut token = launched();
        token.native_mut().mint(alice(), u(native));
        let before = token.state().contract_balance();
        if let Ok(received) = token.buy(alice(), u(native), u(0)) {
            let tax = token.state().contract_balance() - before;
            // 5% buy tax, rounded down
            prop_assert_eq!(tax, (received + tax) * u(500) / u(10_000));
        }
    }
}
