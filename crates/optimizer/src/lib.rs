//! # Riskbench Portfolio Optimizer
//!
//! Best-of-N random-restart optimisation. Each run explores its own seeded
//! synthetic market with a simple return-to-risk gradient ascent; the run with
//! the highest weighted expected return wins.

pub mod error;
pub mod generator;
pub mod portfolio;

pub use error::OptimizerError;
pub use generator::{MarketLandscape, generate_landscape};
pub use portfolio::{
    ITERATIONS, LEARNING_RATE, OptimizationRun, PARALLEL_RUNS, PortfolioOptimizer, optimize_run,
};
