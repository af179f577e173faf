//! # Riskbench Executor Crate
//!
//! The single point of concurrency control in the system. Every workload submits
//! its sub-tasks to one shared [`WorkerPool`] and gets back a [`ResultHandle`]
//! per sub-task; aggregators then block on those handles.
//!
//! ## Architectural Principles
//!
//! - **Bounded backlog:** A pool accepts at most `workers + queue_capacity`
//!   unfinished units. Beyond that, `submit` fails fast with
//!   [`ExecutorError::PoolSaturated`] instead of queueing without limit.
//! - **Owned, not ambient:** The pool is an ordinary value. Callers share it
//!   through an `Arc`, and dropping the last reference shuts the threads down.
//! - **Panics are results:** A unit that panics resolves its handle with
//!   [`ExecutorError::TaskFailed`] carrying the panic message. The worker
//!   thread survives.
//!
//! ## Public API
//!
//! - `WorkerPool`: The fixed-size pool with `submit`, `submit_all` and `stats`.
//! - `ResultHandle`: The pending result of one submitted unit.
//! - `join_all`: Fan-in over a batch of handles with all-or-nothing semantics.
//! - `ExecutorError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod handle;
pub mod pool;

// Re-export the key components to provide a clean, public-facing API.
pub use error::ExecutorError;
pub use handle::{ResultHandle, join_all};
pub use pool::{PoolStats, WorkerPool};
