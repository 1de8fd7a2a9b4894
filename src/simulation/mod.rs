//! Scenario runner
//!
//! A scenario is a JSON file naming actors by label and listing calls against a
//! freshly deployed token. Each step may expect a specific revert; the runner
//! records what happened and reports whether every expectation held.

pub mod actors;
mod runner;
mod scenario;

pub use actors::ActorBook;
pub use runner::{actor_address, Simulation};
pub use scenario::{Action, Funding, Scenario, Step};
