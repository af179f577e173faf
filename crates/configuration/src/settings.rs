use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section carries defaults, so an empty or missing `config.toml`
/// yields a runnable production configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pool: PoolSettings,
    pub fraud: FraudSettings,
    pub stress: StressSettings,
}

impl Config {
    /// Checks the invariants the engine relies on at construction time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.workers == 0 {
            return Err(ConfigError::ValidationError(
                "pool.workers must be at least 1".to_string(),
            ));
        }
        if self.pool.queue_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "pool.queue_capacity must be at least 1".to_string(),
            ));
        }
        let threshold = self.fraud.threshold();
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "fraud.threshold must be a positive number, got {threshold}"
            )));
        }
        Ok(())
    }
}

/// Sizing of the process-wide worker pool shared by every workload.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Number of worker threads.
    pub workers: usize,
    /// Units that may wait for a free worker before submission is refused.
    pub queue_capacity: usize,
    /// Worker threads are named `<prefix>-<index>`.
    pub thread_name_prefix: String,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            workers: 24,
            queue_capacity: 500,
            thread_name_prefix: "parallel".to_string(),
        }
    }
}

/// Known fraud threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FraudProfile {
    /// Strict cutoff used against live traffic.
    #[default]
    Production,
    /// Lenient cutoff so benchmark traffic is not flagged wholesale.
    Test,
}

impl FraudProfile {
    pub fn threshold(&self) -> f64 {
        match self {
            FraudProfile::Production => 150.0,
            FraudProfile::Test => 50_000.0,
        }
    }
}

/// Settings for the suspicion cutoff applied by the fraud check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FraudSettings {
    pub profile: FraudProfile,
    /// An explicit cutoff. Takes precedence over `profile` when present.
    pub threshold: Option<f64>,
}

impl FraudSettings {
    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or_else(|| self.profile.threshold())
    }
}

/// Defaults for the `stress` command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StressSettings {
    /// Number of concurrent requests fired at the engine.
    pub requests: usize,
    /// Account identifiers are assigned from here upwards, one per request.
    pub base_account_id: u64,
    /// Range size used for prime search requests.
    pub prime_range: usize,
}

impl Default for StressSettings {
    fn default() -> Self {
        Self {
            requests: 10,
            base_account_id: 10_000,
            prime_range: 50_000,
        }
    }
}
