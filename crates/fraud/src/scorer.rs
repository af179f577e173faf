use crate::error::FraudError;
use crate::kernels::{
    anomaly_score, complex_risk, digest_value, iterative_hash, simulate_ml_inference,
};
use core_types::{FraudCheckResult, Stopwatch, money};
use executor::{WorkerPool, join_all};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Number of independent hashing sub-tasks per check.
pub const HASH_TASKS: u64 = 8;
/// Rounds in each hashing sub-task's SHA-256 chain.
pub const HASH_ITERATIONS: usize = 500;
/// Fixed anomaly weight fed into the nested-loop risk kernel.
const RISK_ANOMALY_WEIGHT: f64 = 100.0;

/// Scores transactions against a suspicion threshold.
pub struct FraudScorer {
    pool: Arc<WorkerPool>,
    threshold: f64,
}

impl FraudScorer {
    pub fn new(pool: Arc<WorkerPool>, threshold: f64) -> Self {
        Self { pool, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Runs all eleven kernels in parallel and flags the transaction when
    /// `risk + anomaly + ml` exceeds the threshold.
    ///
    /// Every kernel is submitted before any result is awaited. The hash sum is
    /// pure CPU cost and does not enter the decision.
    pub fn check(&self, account_id: u64, amount: Decimal) -> Result<FraudCheckResult, FraudError> {
        let stopwatch = Stopwatch::start();
        let amount = money::to_positive_f64("amount", amount)?;

        // --- 1. Fan out ---
        let hash_handles = self.pool.submit_all((0..HASH_TASKS).map(|task| {
            let seed = format!("{account_id}{task}");
            move || digest_value(&iterative_hash(seed.as_bytes(), HASH_ITERATIONS))
        }))?;
        let anomaly = self.pool.submit(move || anomaly_score(account_id, amount))?;
        let risk = self
            .pool
            .submit(move || complex_risk(amount, RISK_ANOMALY_WEIGHT))?;
        let ml = self
            .pool
            .submit(move || simulate_ml_inference(account_id, amount))?;

        // --- 2. Barrier ---
        let hash_sum: f64 = join_all(hash_handles)?.into_iter().sum();
        let anomaly_score = anomaly.wait()?;
        let risk_score = risk.wait()?;
        let ml_score = ml.wait()?;

        // --- 3. Decide ---
        let total = risk_score + anomaly_score + ml_score;
        let result = FraudCheckResult {
            suspicious: total > self.threshold,
            risk_score,
            anomaly_score,
            ml_score,
            computation_time_nanos: stopwatch.elapsed_nanos(),
        };

        tracing::debug!(account_id, hash_sum, "Hash kernels finished.");
        tracing::info!(
            account_id,
            total_score = total,
            threshold = self.threshold,
            suspicious = result.suspicious,
            elapsed_nanos = result.computation_time_nanos,
            "Fraud check complete."
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::PoolSettings;
    use rust_decimal_macros::dec;

    fn pool(workers: usize, queue_capacity: usize) -> Arc<WorkerPool> {
        Arc::new(
            WorkerPool::new(&PoolSettings {
                workers,
                queue_capacity,
                thread_name_prefix: "fraud-test".to_string(),
            })
            .unwrap(),
        )
    }

    #[test]
    fn suspicion_follows_the_threshold() {
        let shared = pool(4, 32);
        let lenient = FraudScorer::new(Arc::clone(&shared), 1e12);
        let strict = FraudScorer::new(shared, 1e-9);

        let relaxed = lenient.check(12_345, dec!(5000)).unwrap();
        let flagged = strict.check(12_345, dec!(5000)).unwrap();

        assert!(!relaxed.suspicious);
        assert!(flagged.suspicious);
        for result in [&relaxed, &flagged] {
            assert!(result.risk_score >= 0.0);
            assert!(result.anomaly_score >= 0.0);
            assert!(result.ml_score >= 0.0);
            assert!(result.computation_time_nanos > 0);
        }
    }

    #[test]
    fn scores_are_a_function_of_account_and_amount() {
        let scorer = FraudScorer::new(pool(4, 32), 150.0);
        let a = scorer.check(777, dec!(250.75)).unwrap();
        let b = scorer.check(777, dec!(250.75)).unwrap();

        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.anomaly_score, b.anomaly_score);
        assert_eq!(a.ml_score, b.ml_score);
        assert_eq!(a.suspicious, a.total_score() > 150.0);
    }

    #[test]
    fn non_positive_amount_is_rejected_before_submission() {
        // Too small for a full fan-out: validation must fire first.
        let scorer = FraudScorer::new(pool(1, 1), 150.0);
        assert!(matches!(
            scorer.check(1, dec!(0)),
            Err(FraudError::InvalidInput(_))
        ));
        assert!(matches!(
            scorer.check(1, dec!(-10)),
            Err(FraudError::InvalidInput(_))
        ));
    }

    #[test]
    fn undersized_pool_refuses_the_fan_out() {
        let scorer = FraudScorer::new(pool(1, 1), 150.0);
        assert!(matches!(
            scorer.check(1, dec!(10)),
            Err(FraudError::Executor(executor::ExecutorError::PoolSaturated { capacity: 2 }))
        ));
    }
}
