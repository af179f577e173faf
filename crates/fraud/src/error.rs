use core_types::CoreError;
use executor::ExecutorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FraudError {
    #[error("Invalid fraud check request: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("Fraud scoring kernel could not be executed: {0}")]
    Executor(#[from] ExecutorError),
}
