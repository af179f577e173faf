use crate::error::OptimizerError;
use crate::generator::{MarketLandscape, generate_landscape};
use core_types::{NUM_ASSETS, PortfolioOptimization, Stopwatch, money};
use executor::{WorkerPool, join_all};
use ndarray::Array1;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Number of independent optimisation runs per request.
pub const PARALLEL_RUNS: u64 = 8;
/// Ascent steps per run.
pub const ITERATIONS: usize = 2000;
pub const LEARNING_RATE: f64 = 0.001;

/// The outcome of one optimisation run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRun {
    pub seed: u64,
    pub expected_return: f64,
    pub weights: [f64; NUM_ASSETS],
}

/// Fans `PARALLEL_RUNS` optimisation runs out over the shared pool and keeps the best.
pub struct PortfolioOptimizer {
    pool: Arc<WorkerPool>,
}

impl PortfolioOptimizer {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }

    /// Runs seeds `account_id + 0 .. account_id + PARALLEL_RUNS` and returns the
    /// run with the highest expected return.
    ///
    /// The result is a pure function of `account_id`. `balance` is validated
    /// but does not shape the landscape.
    pub fn optimize(
        &self,
        account_id: u64,
        balance: Decimal,
    ) -> Result<PortfolioOptimization, OptimizerError> {
        let stopwatch = Stopwatch::start();
        money::to_f64("balance", balance)?;

        let handles = self.pool.submit_all((0..PARALLEL_RUNS).map(|run_index| {
            let seed = account_id.wrapping_add(run_index);
            move || optimize_run(seed, &generate_landscape(seed))
        }))?;

        let runs = join_all(handles)?;
        let best = runs
            .into_iter()
            .reduce(|best, run| {
                if run.expected_return > best.expected_return {
                    run
                } else {
                    best
                }
            })
            .ok_or(OptimizerError::NoRuns)?;

        let optimization = PortfolioOptimization {
            expected_return: best.expected_return,
            weights: best.weights,
            computation_time_nanos: stopwatch.elapsed_nanos(),
        };

        tracing::info!(
            account_id,
            best_seed = best.seed,
            expected_return = optimization.expected_return,
            elapsed_nanos = optimization.computation_time_nanos,
            "Portfolio optimisation complete."
        );
        Ok(optimization)
    }
}

/// Long-only gradient ascent on return-to-risk over one landscape.
///
/// Starts from equal weights. Every step nudges each weight by
/// `LEARNING_RATE * return_i / risk`, clamps it to `[0, 1]` and renormalises
/// the vector to sum to one.
pub fn optimize_run(seed: u64, landscape: &MarketLandscape) -> OptimizationRun {
    let returns = &landscape.expected_returns;
    let covariance = &landscape.covariance;
    let equal_weight = 1.0 / NUM_ASSETS as f64;
    let mut weights = Array1::from_elem(NUM_ASSETS, equal_weight);

    for _ in 0..ITERATIONS {
        // The covariance matrix is not guaranteed positive definite; keep the
        // variance strictly positive so the gradient stays finite.
        let variance = weights.dot(&covariance.dot(&weights)).max(f64::EPSILON);
        let risk = variance.sqrt();

        weights.zip_mut_with(returns, |w, r| {
            *w = (*w + LEARNING_RATE * (r / risk)).clamp(0.0, 1.0);
        });

        let sum = weights.sum();
        if sum > 0.0 {
            weights /= sum;
        } else {
            weights.fill(equal_weight);
        }
    }

    let expected_return = weights.dot(returns);

    let mut fixed = [0.0; NUM_ASSETS];
    for (slot, w) in fixed.iter_mut().zip(weights.iter()) {
        *slot = *w;
    }

    OptimizationRun {
        seed,
        expected_return,
        weights: fixed,
    }
}
