pub mod fees;
pub mod events;
pub mod config;
pub mod report;

pub use fees::{AccountFlags, Fees, Limits, TransferKind};
pub use events::TokenEvent;
pub use config::TokenConfig;
pub use report::{ActorBalance, ScenarioReport, StepOutcome};
