//! # Riskbench Risk Simulation
//!
//! Monte-Carlo assessment of where an account balance may drift. The trial
//! budget is split into equal batches, every batch runs on the shared worker
//! pool with its own random stream, and the pooled outcomes are summarised
//! into expected value, spread and lower-tail quantiles.

pub mod error;
pub mod monte_carlo;

pub use error::RiskError;
pub use monte_carlo::{
    MONTE_CARLO_SIMULATIONS, RiskSimulator, SIMULATION_TASKS, STEPS_PER_TRIAL, simulate_trial,
};
