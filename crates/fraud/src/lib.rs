//! # Riskbench Fraud Scoring
//!
//! Scores a single transaction by fanning eleven independent numeric kernels
//! out over the shared worker pool: eight chained SHA-256 digests, an anomaly
//! score, a nested-loop risk score and a simulated model inference. The check
//! is all-or-nothing; if any kernel fails no result is produced.

pub mod error;
pub mod kernels;
pub mod scorer;

pub use error::FraudError;
pub use scorer::{FraudScorer, HASH_ITERATIONS, HASH_TASKS};
