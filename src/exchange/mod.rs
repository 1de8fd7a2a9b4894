//! Decentralized-exchange side of the model
//!
//! A UniswapV2Router02 fork reduced to what the token needs: one
//! token/native pair, liquidity provisioning and exact-input swaps in both
//! directions. The pair's token balance lives in the token ledger; the router
//! tracks the matching reserves.

mod math;
mod router;

pub use math::{get_amount_out, min_out, quote};
pub use router::ConstantProductRouter;
