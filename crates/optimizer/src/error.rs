use core_types::CoreError;
use executor::ExecutorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Invalid portfolio optimisation request: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("Optimisation run could not be executed: {0}")]
    Executor(#[from] ExecutorError),

    #[error("No optimisation run produced a result")]
    NoRuns,
}
