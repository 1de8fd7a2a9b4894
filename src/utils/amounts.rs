//! Amount helpers shared by the token, the router and the scenario loader

use ethers::types::U256;

use crate::constants::BPS_DENOMINATOR;
use crate::utils::{Result, SimError, SimResult, TokenError};

/// `amount * bps / 10_000`, rounded down.
pub fn bps_of(amount: U256, bps: u16) -> Result<U256> {
    amount
        .checked_mul(U256::from(bps))
        .map(|v| v / U256::from(BPS_DENOMINATOR))
        .ok_or(TokenError::Overflow)
}

/// Narrow a token amount into the reduced-width storage type.
pub fn to_u128(value: U256) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(TokenError::Overflow);
    }
    Ok(value.as_u128())
}

/// Whole tokens with up to four decimals, assuming 18 decimals.
pub fn format_token_amount(amount: U256) -> String {
    let unit = U256::exp10(18);
    let whole = amount / unit;
    let frac = (amount % unit) / U256::exp10(14);
    if frac.is_zero() {
        format!("{}", whole)
    } else {
        format!("{}.{:04}", whole, frac.as_u64())
    }
}

/// Parse `"1500"` (raw units) or `"1500e18"` (1500 * 10^18).
pub fn parse_amount(raw: &str) -> SimResult<U256> {
    let raw = raw.trim().replace('_', "");
    let (base, exp) = match raw.split_once(|c: char| c == 'e' || c == 'E') {
        Some((base, exp)) => {
            let exp: usize = exp
                .parse()
                .map_err(|_| SimError::InvalidAmount(raw.clone()))?;
            (base.to_string(), exp)
        }
        None => (raw.clone(), 0),
    };
    if exp > 77 {
        return Err(SimError::InvalidAmount(raw));
    }

    let base = U256::from_dec_str(&base).map_err(|_| SimError::InvalidAmount(raw.clone()))?;
    base.checked_mul(U256::exp10(exp))
        .ok_or(SimError::InvalidAmount(raw))
}

/// Serde adapter for token amounts: decimal strings (`"1000e18"`) or plain
/// integers on input, decimal strings on output.
pub mod amount_serde {
    use ethers::types::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(U256::from(n)),
            Raw::Text(s) => super::parse_amount(&s).map_err(de::Error::custom),
        }
    }
}
