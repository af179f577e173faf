//! # Riskbench Analytics Engine
//!
//! Statistical reductions over simulated outcome distributions.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No knowledge of threads or workloads. It takes a bag of
//!   outcomes in any order and produces a `DistributionReport`.
//! - **Order independence:** Outcomes are sorted before any quantile is read,
//!   so callers may concatenate partial results in whatever order they
//!   complete.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The stateless calculator.
//! - `DistributionReport`: Mean, population standard deviation and lower-tail quantiles.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::DistributionReport;
