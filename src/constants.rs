//! Protocol constants fixed by the token's design

/// Basis-point denominator (100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Cap on any single fee rate: 2000 bps = 20%.
pub const MAX_FEE_BPS: u16 = 2_000;

/// Cap on the number of accounts in one batch call.
pub const MAX_BATCH_SIZE: usize = 50;

/// Blocks that must elapse between two automatic swaps.
pub const SWAP_BACK_COOLDOWN_BLOCKS: u64 = 3;

/// An automatic swap never sells more than this multiple of the threshold.
pub const MAX_SWAP_MULTIPLIER: u64 = 20;

/// Slippage tolerance on the launch liquidity: 5%.
pub const LAUNCH_SLIPPAGE_BPS: u16 = 500;

/// Uniswap V2 pair fee: amountIn * 997 / 1000.
pub const PAIR_FEE_NUMERATOR: u64 = 997;
pub const PAIR_FEE_DENOMINATOR: u64 = 1_000;

/// Liquidity locked forever on the first deposit into a pair.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// EIP-712 domain version of the permit extension.
pub const PERMIT_VERSION: &str = "1";
