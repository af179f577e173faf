use serde::{Deserialize, Serialize};

/// Size of the synthetic asset universe used by portfolio optimisation.
pub const NUM_ASSETS: usize = 20;

/// Outcome of a parallel fraud check for a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckResult {
    /// `true` when `risk_score + anomaly_score + ml_score` exceeds the configured threshold.
    pub suspicious: bool,
    pub risk_score: f64,
    pub anomaly_score: f64,
    pub ml_score: f64,
    pub computation_time_nanos: u64,
}

impl FraudCheckResult {
    /// The figure compared against the fraud threshold.
    pub fn total_score(&self) -> f64 {
        self.risk_score + self.anomaly_score + self.ml_score
    }
}

/// Statistics of a Monte-Carlo simulation of an account balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub expected_value: f64,
    pub standard_deviation: f64,
    /// Outcome at the 5th percentile of the sorted simulated balances.
    pub var95: f64,
    /// Outcome at the 1st percentile of the sorted simulated balances.
    pub var99: f64,
    pub computation_time_nanos: u64,
}

/// The best of several independent portfolio optimisation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOptimization {
    pub expected_return: f64,
    /// Long-only asset weights. Each lies in `[0, 1]` and together they sum to ~1.
    pub weights: [f64; NUM_ASSETS],
    pub computation_time_nanos: u64,
}

/// All primes found in an account's search window, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedPrimeResult {
    pub total_primes: usize,
    pub primes: Vec<u64>,
    pub computation_time_nanos: u64,
}

/// Result of the nth-prime account validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeAccountCheck {
    pub account_id: u64,
    /// Position of the prime that was searched for (1-based).
    pub n: u64,
    pub nth_prime: u64,
    pub is_prime_account: bool,
    pub computation_time_nanos: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_score_sums_the_three_components() {
        let result = FraudCheckResult {
            suspicious: false,
            risk_score: 1.5,
            anomaly_score: 2.0,
            ml_score: 0.5,
            computation_time_nanos: 10,
        };
        assert_eq!(result.total_score(), 4.0);
    }

    #[test]
    fn portfolio_serializes_all_weights() {
        let result = PortfolioOptimization {
            expected_return: 0.1,
            weights: [0.05; NUM_ASSETS],
            computation_time_nanos: 1,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["weights"].as_array().unwrap().len(), NUM_ASSETS);
    }
}
