use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] configuration::error::ConfigError),

    #[error("Worker pool error: {0}")]
    Executor(#[from] executor::ExecutorError),

    #[error("Fraud check error: {0}")]
    Fraud(#[from] fraud::FraudError),

    #[error("Risk assessment error: {0}")]
    Risk(#[from] risk::RiskError),

    #[error("Portfolio optimisation error: {0}")]
    Optimizer(#[from] optimizer::OptimizerError),

    #[error("Prime search error: {0}")]
    Primes(#[from] primes::PrimeError),
}

impl EngineError {
    /// The underlying pool error, if this failure came from the worker pool.
    pub fn executor_error(&self) -> Option<&executor::ExecutorError> {
        match self {
            EngineError::Executor(e)
            | EngineError::Fraud(fraud::FraudError::Executor(e))
            | EngineError::Risk(risk::RiskError::Executor(e))
            | EngineError::Optimizer(optimizer::OptimizerError::Executor(e))
            | EngineError::Primes(primes::PrimeError::Executor(e)) => Some(e),
            _ => None,
        }
    }

    /// `true` when the request was refused for capacity and may be retried.
    pub fn is_transient(&self) -> bool {
        self.executor_error()
            .is_some_and(executor::ExecutorError::is_transient)
    }

    /// `true` when the request was rejected before any work was submitted.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            EngineError::Fraud(fraud::FraudError::InvalidInput(_))
                | EngineError::Risk(risk::RiskError::InvalidInput(_))
                | EngineError::Optimizer(optimizer::OptimizerError::InvalidInput(_))
                | EngineError::Primes(primes::PrimeError::InvalidInput(_))
        )
    }
}
