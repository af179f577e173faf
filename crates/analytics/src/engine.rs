use crate::error::AnalyticsError;
use crate::report::DistributionReport;

/// A stateless calculator for summarising outcome distributions.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for summarising a distribution.
    ///
    /// # Arguments
    ///
    /// * `outcomes` - Every simulated outcome, in any order. Sorted in place.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DistributionReport` or an `AnalyticsError`.
    pub fn summarize(&self, mut outcomes: Vec<f64>) -> Result<DistributionReport, AnalyticsError> {
        if outcomes.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "at least one outcome is required".to_string(),
            ));
        }
        if let Some(position) = outcomes.iter().position(|v| !v.is_finite()) {
            return Err(AnalyticsError::NonFinite(position));
        }

        outcomes.sort_by(f64::total_cmp);

        let mean = self.mean(&outcomes);
        let std_dev = self.population_std_dev(&outcomes, mean);
        let report = DistributionReport {
            count: outcomes.len(),
            mean,
            std_dev,
            var95: self.lower_quantile(&outcomes, 0.05),
            var99: self.lower_quantile(&outcomes, 0.01),
        };

        tracing::debug!(
            count = report.count,
            mean = report.mean,
            std_dev = report.std_dev,
            "Outcome distribution summarised."
        );
        Ok(report)
    }

    fn mean(&self, values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn population_std_dev(&self, values: &[f64], mean: f64) -> f64 {
        let sum_squared_diff: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (sum_squared_diff / values.len() as f64).sqrt()
    }

    /// Reads the value at `floor(len * fraction)` of an ascending slice.
    fn lower_quantile(&self, sorted: &[f64], fraction: f64) -> f64 {
        let index = (sorted.len() as f64 * fraction) as usize;
        sorted[index.min(sorted.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarises_a_known_distribution() {
        // 1..=100 shuffled by reversing.
        let outcomes: Vec<f64> = (1..=100).rev().map(f64::from).collect();
        let report = AnalyticsEngine::new().summarize(outcomes).unwrap();

        assert_eq!(report.count, 100);
        assert_eq!(report.mean, 50.5);
        assert!((report.std_dev - 28.866_070_047_722_118).abs() < 1e-9);
        assert_eq!(report.var95, 6.0);
        assert_eq!(report.var99, 2.0);
        assert!(report.var99 <= report.var95);
    }

    #[test]
    fn single_outcome_has_zero_spread() {
        let report = AnalyticsEngine::new().summarize(vec![42.0]).unwrap();
        assert_eq!(report.std_dev, 0.0);
        assert_eq!(report.var95, 42.0);
        assert_eq!(report.var99, 42.0);
    }

    #[test]
    fn empty_distribution_is_an_error() {
        assert!(matches!(
            AnalyticsEngine::new().summarize(Vec::new()),
            Err(AnalyticsError::NotEnoughData(_))
        ));
    }

    #[test]
    fn non_finite_outcomes_are_rejected() {
        assert_eq!(
            AnalyticsEngine::new().summarize(vec![1.0, f64::NAN, 3.0]),
            Err(AnalyticsError::NonFinite(1))
        );
    }
}
