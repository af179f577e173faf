use crate::error::RiskError;
use analytics::AnalyticsEngine;
use core_types::{RiskAssessment, RngSource, Stopwatch, money, next_gaussian};
use executor::{WorkerPool, join_all};
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Total trial budget of one assessment.
pub const MONTE_CARLO_SIMULATIONS: usize = 15_000;
/// Number of batches the budget is split into.
pub const SIMULATION_TASKS: usize = 16;
/// Length of each random walk.
pub const STEPS_PER_TRIAL: usize = 100;

/// Runs the Monte-Carlo balance simulation on a shared worker pool.
///
/// Each batch draws from its own stream. With the default
/// [`RngSource::Entropy`] the ensemble differs from run to run; only the
/// partitioning into batches is fixed. Inject [`RngSource::Seeded`] to make a
/// given `(account_id, balance)` reproduce exactly.
pub struct RiskSimulator {
    pool: Arc<WorkerPool>,
    rng_source: RngSource,
    analytics: AnalyticsEngine,
}

impl RiskSimulator {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self {
            pool,
            rng_source: RngSource::Entropy,
            analytics: AnalyticsEngine::new(),
        }
    }

    pub fn with_rng_source(mut self, rng_source: RngSource) -> Self {
        self.rng_source = rng_source;
        self
    }

    /// Simulates `MONTE_CARLO_SIMULATIONS / SIMULATION_TASKS` trials per batch.
    ///
    /// The integer division drops the remainder trials, so an assessment
    /// always pools `SIMULATION_TASKS * (MONTE_CARLO_SIMULATIONS / SIMULATION_TASKS)`
    /// outcomes.
    pub fn assess(&self, account_id: u64, balance: Decimal) -> Result<RiskAssessment, RiskError> {
        let stopwatch = Stopwatch::start();
        let balance = money::to_f64("balance", balance)?;

        let trials_per_task = MONTE_CARLO_SIMULATIONS / SIMULATION_TASKS;
        let rng_source = self.rng_source;

        let handles = self.pool.submit_all((0..SIMULATION_TASKS as u64).map(move |task| {
            move || {
                let mut rng = rng_source.stream(account_id, task);
                let outcomes: Vec<f64> = (0..trials_per_task)
                    .map(|_| simulate_trial(&mut rng, balance))
                    .collect();
                tracing::debug!(account_id, task, trials = outcomes.len(), "Simulation batch finished.");
                outcomes
            }
        }))?;

        // Batch order is irrelevant; the analytics engine sorts before reading quantiles.
        let outcomes: Vec<f64> = join_all(handles)?.into_iter().flatten().collect();
        let report = self.analytics.summarize(outcomes)?;

        let assessment = RiskAssessment {
            expected_value: report.mean,
            standard_deviation: report.std_dev,
            var95: report.var95,
            var99: report.var99,
            computation_time_nanos: stopwatch.elapsed_nanos(),
        };

        tracing::info!(
            account_id,
            trials = report.count,
            expected_value = assessment.expected_value,
            elapsed_nanos = assessment.computation_time_nanos,
            "Risk assessment complete."
        );
        Ok(assessment)
    }
}

/// Walks a balance through `STEPS_PER_TRIAL` steps of drift and volatility.
pub fn simulate_trial<R: Rng + ?Sized>(rng: &mut R, balance: f64) -> f64 {
    let mut simulated = balance;
    for step in 0..STEPS_PER_TRIAL {
        let step = step as f64;
        let drift = (step * 0.1).sin() * 0.05;
        let volatility = (step + 1.0).sqrt() * 0.02;
        let change = next_gaussian(rng) * volatility + drift;

        simulated *= 1.0 + change;
        simulated += simulated.abs().ln_1p() * step.cos();
    }
    simulated
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::PoolSettings;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    fn pool() -> Arc<WorkerPool> {
        Arc::new(
            WorkerPool::new(&PoolSettings {
                workers: 4,
                queue_capacity: 64,
                thread_name_prefix: "risk-test".to_string(),
            })
            .unwrap(),
        )
    }

    #[test]
    fn trial_is_deterministic_given_its_draws() {
        let a = simulate_trial(&mut StdRng::seed_from_u64(9), 10_000.0);
        let b = simulate_trial(&mut StdRng::seed_from_u64(9), 10_000.0);
        assert_eq!(a, b);
        assert!(a.is_finite());
    }

    #[test]
    fn assessment_orders_its_quantiles() {
        let simulator = RiskSimulator::new(pool());
        let result = simulator.assess(54_321, dec!(10000.0)).unwrap();

        assert!(result.expected_value > 0.0);
        assert!(result.standard_deviation >= 0.0);
        assert!(result.var99 <= result.var95);
        assert!(result.computation_time_nanos > 0);
    }

    #[test]
    fn seeded_assessment_is_reproducible() {
        let simulator = RiskSimulator::new(pool()).with_rng_source(RngSource::Seeded(2024));
        let first = simulator.assess(7, dec!(2500)).unwrap();
        let second = simulator.assess(7, dec!(2500)).unwrap();

        assert_eq!(first.expected_value, second.expected_value);
        assert_eq!(first.standard_deviation, second.standard_deviation);
        assert_eq!(first.var95, second.var95);
        assert_eq!(first.var99, second.var99);

        let other_account = simulator.assess(8, dec!(2500)).unwrap();
        assert_ne!(first.expected_value, other_account.expected_value);
    }

    #[test]
    fn saturated_pool_fails_the_whole_assessment() {
        let small = Arc::new(
            WorkerPool::new(&PoolSettings {
                workers: 1,
                queue_capacity: 4,
                thread_name_prefix: "tiny".to_string(),
            })
            .unwrap(),
        );
        let simulator = RiskSimulator::new(small);
        assert!(matches!(
            simulator.assess(1, dec!(100)),
            Err(RiskError::Executor(executor::ExecutorError::PoolSaturated { .. }))
        ));
    }
}
