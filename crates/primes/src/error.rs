use core_types::CoreError;
use executor::ExecutorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimeError {
    #[error("Invalid prime search request: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("Prime search sub-range could not be executed: {0}")]
    Executor(#[from] ExecutorError),
}
