pub mod chain;
pub mod portfolio;
pub mod targets;

pub use chain::Chain;
pub use portfolio::*;
pub use targets::{ReserveAddress, ReserveTargets, TargetsError};
