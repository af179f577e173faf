use serde::{Deserialize, Serialize};

/// Summary statistics of a simulated outcome distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub count: usize,
    pub mean: f64,
    /// Population (not sample) standard deviation.
    pub std_dev: f64,
    /// Outcome at index `floor(count * 0.05)` of the ascending sort.
    pub var95: f64,
    /// Outcome at index `floor(count * 0.01)` of the ascending sort.
    pub var99: f64,
}
