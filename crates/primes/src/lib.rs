//! # Riskbench Prime Search
//!
//! A bounded, embarrassingly parallel prime search over an account's numeric
//! window, plus the nth-prime account validation check.

pub mod error;
pub mod primality;
pub mod search;

pub use error::PrimeError;
pub use primality::{is_prime, nth_prime};
pub use search::{PrimeSearcher, SEARCH_TASKS, WINDOW_STRIDE};
