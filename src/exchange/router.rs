//! In-memory UniswapV2-style router with a single token/native pair

use std::collections::HashMap;

use ethers::types::{Address, U256};

use super::math::{get_amount_out, quote};
use crate::constants::MINIMUM_LIQUIDITY;
use crate::core::{LiquidityReceipt, SwapRouter};
use crate::storage::keccak256_concat;
use crate::utils::{Result, TokenError};

#[derive(Debug, Clone)]
pub struct ConstantProductRouter {
    address: Address,
    pair: Option<Address>,
    reserve_token: U256,
    reserve_native: U256,
    lp_supply: U256,
    lp_balances: HashMap<Address, U256>,
}

impl ConstantProductRouter {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            pair: None,
            reserve_token: U256::zero(),
            reserve_native: U256::zero(),
            lp_supply: U256::zero(),
            lp_balances: HashMap::new(),
        }
    }

    /// CREATE2-style deterministic pair address.
    pub fn pair_address_for(router: Address, token: Address) -> Address {
        let hash = keccak256_concat(&[b"pair", router.as_bytes(), token.as_bytes()]);
        Address::from_slice(&hash[12..])
    }

    pub fn lp_balance_of(&self, owner: Address) -> U256 {
        self.lp_balances.get(&owner).copied().unwrap_or_default()
    }

    pub fn lp_supply(&self) -> U256 {
        self.lp_supply
    }

    fn require_pair(&self) -> Result<()> {
        self.pair.map(|_| ()).ok_or(TokenError::PairMissing)
    }

    fn mint_lp(&mut self, token_in: U256, native_in: U256, to: Address) -> Result<U256> {
        let liquidity = if self.lp_supply.is_zero() {
            let root = token_in
                .checked_mul(native_in)
                .ok_or(TokenError::Overflow)?
                .integer_sqrt();
            let locked = U256::from(MINIMUM_LIQUIDITY);
            if root <= locked {
                return Err(TokenError::InsufficientLiquidity);
            }
            self.lp_supply = locked;
            root - locked
        } else {
            let by_token = quote(token_in, self.reserve_token, self.lp_supply)?;
            let by_native = quote(native_in, self.reserve_native, self.lp_supply)?;
            by_token.min(by_native)
        };
        if liquidity.is_zero() {
            return Err(TokenError::InsufficientLiquidity);
        }
        self.lp_supply = self.lp_supply.checked_add(liquidity).ok_or(TokenError::Overflow)?;
        *self.lp_balances.entry(to).or_default() += liquidity;
        Ok(liquidity)
    }
}

impl SwapRouter for ConstantProductRouter {
    fn address(&self) -> Address {
        self.address
    }

    fn pair(&self) -> Option<Address> {
        self.pair
    }

    fn pair_for(&self, token: Address) -> Address {
        self.pair.unwrap_or_else(|| Self::pair_address_for(self.address, token))
    }

    fn create_pair(&mut self, token: Address) -> Result<Address> {
        if self.pair.is_some() {
            return Err(TokenError::PairExists);
        }
        let pair = Self::pair_address_for(self.address, token);
        tracing::info!("🏭 Created pair {:?} for token {:?}", pair, token);
        self.pair = Some(pair);
        Ok(pair)
    }

    fn reserves(&self) -> (U256, U256) {
        (self.reserve_token, self.reserve_native)
    }

    fn add_liquidity_native(
        &mut self,
        token_desired: U256,
        native_desired: U256,
        token_min: U256,
        native_min: U256,
        to: Address,
    ) -> Result<LiquidityReceipt> {
        self.require_pair()?;

        let (token_used, native_used) = if self.reserve_token.is_zero() && self.reserve_native.is_zero() {
            (token_desired, native_desired)
        } else {
            let native_optimal = quote(token_desired, self.reserve_token, self.reserve_native)?;
            if native_optimal <= native_desired {
                if native_optimal < native_min {
                    return Err(TokenError::InsufficientOutput { amount: native_optimal, minimum: native_min });
                }
                (token_desired, native_optimal)
            } else {
                let token_optimal = quote(native_desired, self.reserve_native, self.reserve_token)?;
                if token_optimal < token_min {
                    return Err(TokenError::InsufficientOutput { amount: token_optimal, minimum: token_min });
                }
                (token_optimal, native_desired)
            }
        };
        if token_used < token_min {
            return Err(TokenError::InsufficientOutput { amount: token_used, minimum: token_min });
        }
        if native_used < native_min {
            return Err(TokenError::InsufficientOutput { amount: native_used, minimum: native_min });
        }

        let reserve_token = self.reserve_token.checked_add(token_used).ok_or(TokenError::Overflow)?;
        let reserve_native = self.reserve_native.checked_add(native_used).ok_or(TokenError::Overflow)?;
        let liquidity = self.mint_lp(token_used, native_used, to)?;
        self.reserve_token = reserve_token;
        self.reserve_native = reserve_native;

        tracing::debug!(
            "Added liquidity: {} tokens, {} native, {} LP",
            token_used, native_used, liquidity
        );
        Ok(LiquidityReceipt { token_used, native_used, liquidity })
    }

    fn quote_tokens_for_native(&self, amount_in: U256) -> Result<U256> {
        get_amount_out(amount_in, self.reserve_token, self.reserve_native)
    }

    fn quote_native_for_tokens(&self, native_in: U256) -> Result<U256> {
        get_amount_out(native_in, self.reserve_native, self.reserve_token)
    }

    fn swap_exact_tokens_for_native(&mut self, amount_in: U256, amount_out_min: U256) -> Result<U256> {
        self.require_pair()?;
        let out = self.quote_tokens_for_native(amount_in)?;
        if out < amount_out_min {
            return Err(TokenError::InsufficientOutput { amount: out, minimum: amount_out_min });
        }
        self.reserve_token = self.reserve_token.checked_add(amount_in).ok_or(TokenError::Overflow)?;
        self.reserve_native -= out;
        Ok(out)
    }

    fn swap_exact_native_for_tokens(&mut self, native_in: U256, amount_out_min: U256) -> Result<U256> {
        self.require_pair()?;
        let out = self.quote_native_for_tokens(native_in)?;
        if out < amount_out_min {
            return Err(TokenError::InsufficientOutput { amount: out, minimum: amount_out_min });
        }
        self.reserve_native = self.reserve_native.checked_add(native_in).ok_or(TokenError::Overflow)?;
        self.reserve_token -= out;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ConstantProductRouter {
        let mut router = ConstantProductRouter::new(Address::from_low_u64_be(0xA0));
        router.create_pair(Address::from_low_u64_be(0x70)).unwrap();
        router
            .add_liquidity_native(
                U256::from(1_000_000u64),
                U256::from(1_000_000u64),
                U256::zero(),
                U256::zero(),
                Address::from_low_u64_be(1),
            )
            .unwrap();
        router
    }

    #[test]
    fn test_first_deposit_locks_minimum() {
        let router = seeded();
        assert_eq!(router.lp_supply(), U256::from(1_000_000u64));
        assert_eq!(router.lp_balance_of(Address::from_low_u64_be(1)), U256::from(999_000u64));
    }

    #[test]
    fn test_swap_moves_reserves() {
        let mut router = seeded();
        let out = router.swap_exact_tokens_for_native(U256::from(1_000), U256::zero()).unwrap();
        assert_eq!(out, U256::from(996));
        assert_eq!(router.reserves(), (U256::from(1_001_000u64), U256::from(999_004u64)));
    }

    #[test]
    fn test_min_out_enforced() {
        let mut router = seeded();
        let err = router
            .swap_exact_native_for_tokens(U256::from(1_000), U256::from(997))
            .unwrap_err();
        assert_eq!(err, TokenError::InsufficientOutput { amount: U256::from(996), minimum: U256::from(997) });
        assert_eq!(router.reserves(), (U256::from(1_000_000u64), U256::from(1_000_000u64)));
    }

    #[test]
    fn test_swap_without_pair_fails() {
        let mut router = ConstantProductRouter::new(Address::from_low_u64_be(5));
        assert_eq!(
            router.swap_exact_tokens_for_native(U256::one(), U256::zero()),
            Err(TokenError::PairMissing)
        );
    }

    #[test]
    fn test_pair_created_once() {
        let mut router = seeded();
        assert_eq!(router.create_pair(Address::from_low_u64_be(0x70)), Err(TokenError::PairExists));
    }
}
