//! Constant-product (x * y = k) pricing, as in UniswapV2Library

use ethers::types::U256;

use crate::constants::{BPS_DENOMINATOR, PAIR_FEE_DENOMINATOR, PAIR_FEE_NUMERATOR};
use crate::utils::{Result, TokenError};

/// amountOut = (amountIn * 997 * reserveOut) / (reserveIn * 1000 + amountIn * 997)
pub fn get_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
    if amount_in.is_zero() {
        return Err(TokenError::NothingToSwap);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(TokenError::InsufficientLiquidity);
    }
    let amount_in_with_fee = amount_in
        .checked_mul(U256::from(PAIR_FEE_NUMERATOR))
        .ok_or(TokenError::Overflow)?;
    let numerator = amount_in_with_fee
        .checked_mul(reserve_out)
        .ok_or(TokenError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(U256::from(PAIR_FEE_DENOMINATOR))
        .and_then(|v| v.checked_add(amount_in_with_fee))
        .ok_or(TokenError::Overflow)?;
    Ok(numerator / denominator)
}

/// Equivalent amount of the other asset at the current price, no fee.
pub fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256> {
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(TokenError::InsufficientLiquidity);
    }
    amount_a
        .checked_mul(reserve_b)
        .map(|v| v / reserve_a)
        .ok_or(TokenError::Overflow)
}

/// Lowest acceptable output for `expected` with `slippage_bps` tolerance.
pub fn min_out(expected: U256, slippage_bps: u16) -> Result<U256> {
    let keep = BPS_DENOMINATOR.saturating_sub(u64::from(slippage_bps));
    expected
        .checked_mul(U256::from(keep))
        .map(|v| v / U256::from(BPS_DENOMINATOR))
        .ok_or(TokenError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_out_matches_v2_formula() {
        // 1000 in against 1_000_000 / 1_000_000 reserves
        let out = get_amount_out(U256::from(1_000), U256::from(1_000_000), U256::from(1_000_000)).unwrap();
        // 997_000 * 1_000_000 / (1_000_000_000 + 997_000) = 996.00...
        assert_eq!(out, U256::from(996));
    }

    #[test]
    fn test_amount_out_rejects_empty_pool() {
        assert_eq!(
            get_amount_out(U256::one(), U256::zero(), U256::from(10)),
            Err(TokenError::InsufficientLiquidity)
        );
        assert_eq!(
            get_amount_out(U256::zero(), U256::one(), U256::one()),
            Err(TokenError::NothingToSwap)
        );
    }

    #[test]
    fn test_quote_and_min_out() {
        assert_eq!(quote(U256::from(10), U256::from(100), U256::from(300)).unwrap(), U256::from(30));
        assert_eq!(min_out(U256::from(1_000), 500).unwrap(), U256::from(950));
        assert_eq!(min_out(U256::from(1_000), 0).unwrap(), U256::from(1_000));
        assert_eq!(min_out(U256::MAX, 500), Err(TokenError::Overflow));
    }
}
