use crate::error::ExecutorError;
use std::sync::mpsc::Receiver;

/// The pending result of one unit of work submitted to a [`WorkerPool`].
///
/// Exactly one worker produces the value and the handle is consumed by the
/// single call to [`ResultHandle::wait`].
///
/// [`WorkerPool`]: crate::WorkerPool
#[derive(Debug)]
pub struct ResultHandle<T> {
    receiver: Receiver<Result<T, ExecutorError>>,
}

impl<T> ResultHandle<T> {
    pub(crate) fn new(receiver: Receiver<Result<T, ExecutorError>>) -> Self {
        Self { receiver }
    }

    /// Blocks the calling thread until the unit has run.
    ///
    /// Safe to call from any thread, including an async runtime worker, though
    /// there it stalls the worker for the duration of the unit.
    pub fn wait(self) -> Result<T, ExecutorError> {
        self.receiver.recv().unwrap_or_else(|_| {
            Err(ExecutorError::TaskFailed(
                "worker dropped the unit before producing a result".to_string(),
            ))
        })
    }
}

/// Waits on every handle in submission order.
///
/// Fails with the first error encountered; no partial results are returned.
pub fn join_all<T>(handles: Vec<ResultHandle<T>>) -> Result<Vec<T>, ExecutorError> {
    handles.into_iter().map(ResultHandle::wait).collect()
}
