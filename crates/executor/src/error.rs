use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("Worker pool is saturated: {capacity} units already in flight")]
    PoolSaturated { capacity: usize },

    #[error("Sub-task failed: {0}")]
    TaskFailed(String),

    #[error("Failed to build worker pool: {0}")]
    PoolBuild(String),
}

impl ExecutorError {
    /// Saturation clears up once in-flight work drains; callers may retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExecutorError::PoolSaturated { .. })
    }
}
