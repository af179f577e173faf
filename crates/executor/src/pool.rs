use crate::error::ExecutorError;
use crate::handle::ResultHandle;
use configuration::PoolSettings;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A point-in-time view of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub workers: usize,
    pub queue_capacity: usize,
    /// Units submitted but not yet finished, running or queued.
    pub in_flight: usize,
}

/// A fixed-size pool of worker threads with a bounded backlog.
pub struct WorkerPool {
    threads: rayon::ThreadPool,
    in_flight: Arc<AtomicUsize>,
    workers: usize,
    queue_capacity: usize,
}

impl WorkerPool {
    /// Builds a pool with `settings.workers` named threads.
    pub fn new(settings: &PoolSettings) -> Result<Self, ExecutorError> {
        if settings.workers == 0 {
            return Err(ExecutorError::PoolBuild(
                "a pool needs at least one worker".to_string(),
            ));
        }

        let prefix = settings.thread_name_prefix.clone();
        let threads = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.workers)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()
            .map_err(|e| ExecutorError::PoolBuild(e.to_string()))?;

        tracing::info!(
            workers = settings.workers,
            queue_capacity = settings.queue_capacity,
            "Worker pool started."
        );

        Ok(Self {
            threads,
            in_flight: Arc::new(AtomicUsize::new(0)),
            workers: settings.workers,
            queue_capacity: settings.queue_capacity,
        })
    }

    /// The maximum number of unfinished units the pool accepts.
    pub fn capacity(&self) -> usize {
        self.workers + self.queue_capacity
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            in_flight: self.in_flight.load(Ordering::Acquire),
        }
    }

    /// Hands a unit of work to the pool without waiting for it to run.
    ///
    /// Returns `PoolSaturated` when the backlog is already full.
    pub fn submit<T, F>(&self, work: F) -> Result<ResultHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let slot = self.reserve_slot()?;
        // One slot: the worker's single send never blocks.
        let (sender, receiver) = mpsc::sync_channel(1);

        self.threads.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(work))
                .map_err(|payload| ExecutorError::TaskFailed(panic_message(payload.as_ref())));
            // Free the slot before waking the waiter so capacity is visible to it.
            drop(slot);
            // The aggregator may have given up on this request already.
            let _ = sender.send(outcome);
        });

        Ok(ResultHandle::new(receiver))
    }

    /// Submits every unit in order and returns their handles.
    ///
    /// Stops at the first refused submission. Units already handed over keep
    /// running; their results are discarded when the returned error drops the
    /// handles.
    pub fn submit_all<T, F, I>(&self, units: I) -> Result<Vec<ResultHandle<T>>, ExecutorError>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        units.into_iter().map(|unit| self.submit(unit)).collect()
    }

    fn reserve_slot(&self) -> Result<SlotGuard, ExecutorError> {
        let capacity = self.capacity();
        self.in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < capacity).then_some(n + 1)
            })
            .map(|_| SlotGuard(Arc::clone(&self.in_flight)))
            .map_err(|_| {
                tracing::warn!(capacity, "Worker pool saturated; rejecting submission.");
                ExecutorError::PoolSaturated { capacity }
            })
    }
}

/// Releases one backlog slot when dropped.
struct SlotGuard(Arc<AtomicUsize>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "sub-task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::join_all;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn settings(workers: usize, queue_capacity: usize) -> PoolSettings {
        PoolSettings {
            workers,
            queue_capacity,
            thread_name_prefix: "test".to_string(),
        }
    }

    #[test]
    fn submit_and_wait_returns_value() {
        let pool = WorkerPool::new(&settings(2, 4)).unwrap();
        let handle = pool.submit(|| 6 * 7).unwrap();
        assert_eq!(handle.wait(), Ok(42));
    }

    #[test]
    fn workers_carry_the_configured_name() {
        let pool = WorkerPool::new(&settings(1, 1)).unwrap();
        let name = pool
            .submit(|| thread::current().name().map(str::to_string))
            .unwrap()
            .wait()
            .unwrap();
        assert_eq!(name.as_deref(), Some("test-0"));
    }

    #[test]
    fn join_all_preserves_submission_order() {
        let pool = WorkerPool::new(&settings(4, 16)).unwrap();
        let handles = pool
            .submit_all((0..10u64).map(|i| {
                move || {
                    // Later units finish first.
                    thread::sleep(Duration::from_millis(10 - i));
                    i * i
                }
            }))
            .unwrap();
        let squares = join_all(handles).unwrap();
        assert_eq!(squares, (0..10u64).map(|i| i * i).collect::<Vec<_>>());
    }

    #[test]
    fn panicking_unit_surfaces_as_task_failed() {
        let pool = WorkerPool::new(&settings(1, 1)).unwrap();
        let handle = pool.submit(|| -> u32 { panic!("kernel blew up") }).unwrap();
        assert_eq!(
            handle.wait(),
            Err(ExecutorError::TaskFailed("kernel blew up".to_string()))
        );

        // The worker survives the panic and the slot is released.
        assert_eq!(pool.submit(|| 1).unwrap().wait(), Ok(1));
        assert_eq!(pool.stats().in_flight, 0);
    }

    #[test]
    fn one_failure_fails_the_whole_join() {
        let pool = WorkerPool::new(&settings(2, 8)).unwrap();
        let handles = pool
            .submit_all((0..4).map(|i| {
                move || {
                    if i == 2 {
                        panic!("sub-task {i} failed");
                    }
                    i
                }
            }))
            .unwrap();
        assert!(matches!(join_all(handles), Err(ExecutorError::TaskFailed(_))));
    }

    #[test]
    fn submission_beyond_capacity_is_refused() {
        let pool = WorkerPool::new(&settings(1, 1)).unwrap();
        assert_eq!(pool.capacity(), 2);

        let (release, gate) = mpsc::channel::<()>();
        let blocked = pool.submit(move || gate.recv().is_ok()).unwrap();
        let queued = pool.submit(|| true).unwrap();
        assert_eq!(pool.stats().in_flight, 2);

        let refused = pool.submit(|| true);
        assert!(matches!(
            refused,
            Err(ExecutorError::PoolSaturated { capacity: 2 })
        ));
        assert!(refused.unwrap_err().is_transient());

        release.send(()).unwrap();
        assert_eq!(blocked.wait(), Ok(true));
        assert_eq!(queued.wait(), Ok(true));
        assert_eq!(pool.stats().in_flight, 0);
        assert!(pool.submit(|| true).is_ok());
    }

    #[tokio::test]
    async fn wait_is_safe_on_an_async_runtime_thread() {
        let pool = WorkerPool::new(&settings(2, 4)).unwrap();
        let handles = pool.submit_all((1..=3u64).map(|i| move || i * 10)).unwrap();
        assert_eq!(join_all(handles), Ok(vec![10, 20, 30]));
        assert_eq!(pool.submit(|| 5).unwrap().wait(), Ok(5));
    }

    #[test]
    fn zero_workers_is_a_build_error() {
        assert!(matches!(
            WorkerPool::new(&settings(0, 1)),
            Err(ExecutorError::PoolBuild(_))
        ));
    }

    #[test]
    fn concurrent_submitters_share_one_pool() {
        let pool = Arc::new(WorkerPool::new(&settings(4, 64)).unwrap());
        let submitters: Vec<_> = (0..8u64)
            .map(|caller| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    let handles = pool
                        .submit_all((0..4u64).map(|i| move || caller * 100 + i))
                        .unwrap();
                    join_all(handles).unwrap()
                })
            })
            .collect();

        for (caller, submitter) in submitters.into_iter().enumerate() {
            let values = submitter.join().unwrap();
            let caller = caller as u64;
            assert_eq!(values, (0..4).map(|i| caller * 100 + i).collect::<Vec<_>>());
        }
    }
}
