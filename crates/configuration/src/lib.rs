use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, FraudProfile, FraudSettings, PoolSettings, StressSettings};

/// Prefix for environment variable overrides, e.g. `RISKBENCH_POOL__WORKERS=48`.
pub const ENV_PREFIX: &str = "RISKBENCH";

/// Loads the application configuration.
///
/// Reads the TOML file at `path` if it exists, layers `RISKBENCH_*` environment
/// variables on top, deserializes the result into our strongly-typed `Config`
/// struct and validates it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        workers = config.pool.workers,
        queue_capacity = config.pool.queue_capacity,
        fraud_threshold = config.fraud.threshold(),
        "Configuration loaded."
    );

    Ok(config)
}
