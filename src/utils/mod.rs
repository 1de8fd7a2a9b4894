pub mod errors;
pub mod amounts;

pub use errors::{Result, SimError, SimResult, TokenError};
pub use amounts::{amount_serde, bps_of, format_token_amount, parse_amount, to_u128};
