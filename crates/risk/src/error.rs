use analytics::AnalyticsError;
use core_types::CoreError;
use executor::ExecutorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid risk simulation request: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("Simulation batch could not be executed: {0}")]
    Executor(#[from] ExecutorError),

    #[error("Outcome distribution could not be summarised: {0}")]
    Analytics(#[from] AnalyticsError),
}
