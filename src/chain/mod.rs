//! Execution environment seen by the token: block context and native currency

mod native;

pub use native::NativeLedger;

use serde::{Deserialize, Serialize};

/// Seconds between blocks when the simulation advances time.
pub const BLOCK_TIME_SECS: u64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEnv {
    pub number: u64,
    pub timestamp: u64,
    pub chain_id: u64,
}

impl BlockEnv {
    pub fn new(chain_id: u64) -> Self {
        Self { number: 1, timestamp: 1_700_000_000, chain_id }
    }

    /// Mine `blocks` empty blocks.
    pub fn advance(&mut self, blocks: u64) {
        self.number += blocks;
        self.timestamp += blocks * BLOCK_TIME_SECS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_time() {
        let mut env = BlockEnv::new(1);
        env.advance(5);
        assert_eq!(env.number, 6);
        assert_eq!(env.timestamp, 1_700_000_000 + 60);
    }
}
