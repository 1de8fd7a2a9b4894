pub mod access;
pub mod chain;
pub mod constants;
pub mod exchange;
pub mod permit;
pub mod pipeline;
pub mod simulation;
pub mod storage;   // packed slot layout and gas view

pub mod core;
pub mod models;
pub mod utils;

pub use access::Role;
pub use self::core::{Deployment, SwapRouter, TaxToken, TokenState};
pub use exchange::ConstantProductRouter;
pub use models::{Fees, Limits, ScenarioReport, TokenConfig, TokenEvent, TransferKind};
pub use simulation::{Scenario, Simulation};
pub use utils::{Result, SimError, SimResult, TokenError};
