//! # Riskbench Core Types
//!
//! Layer 0 of the workspace. Defines the result structures returned by every
//! workload, the shared input validation error, and the small numeric helpers
//! (Gaussian sampling, seeded random streams, elapsed-time measurement) that
//! the workload crates build on.

pub mod enums;
pub mod error;
pub mod money;
pub mod sampling;
pub mod structs;
pub mod timing;

// Re-export the core types to provide a clean public API.
pub use enums::WorkloadKind;
pub use error::CoreError;
pub use sampling::{RngSource, next_gaussian};
pub use structs::{
    DistributedPrimeResult, FraudCheckResult, PortfolioOptimization, PrimeAccountCheck,
    RiskAssessment, NUM_ASSETS,
};
pub use timing::Stopwatch;
