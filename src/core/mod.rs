pub mod traits;
pub mod state;
pub mod token;
mod admin;
mod launch;
mod market;
mod upgrade;

pub use traits::{LiquidityReceipt, SwapRouter, TransferStage};
pub use state::{ProxyState, TokenState};
pub use token::{Deployment, TaxToken};
pub use launch::SwapBackReceipt;
