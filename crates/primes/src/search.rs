use crate::error::PrimeError;
use crate::primality::{is_prime, nth_prime};
use core_types::{CoreError, DistributedPrimeResult, PrimeAccountCheck, Stopwatch};
use executor::{WorkerPool, join_all};
use std::ops::Range;
use std::sync::Arc;

/// Number of contiguous sub-ranges a search window is split into.
pub const SEARCH_TASKS: u64 = 12;
/// Each account owns the window starting at `account_id * WINDOW_STRIDE`.
pub const WINDOW_STRIDE: u64 = 1000;

/// Base of the nth-prime account check: `n = account_id % 10_000 + 1000`.
const ACCOUNT_CHECK_MODULUS: u64 = 10_000;
const ACCOUNT_CHECK_OFFSET: u64 = 1000;

pub struct PrimeSearcher {
    pool: Arc<WorkerPool>,
}

impl PrimeSearcher {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }

    /// Finds the primes in the window starting at `account_id * 1000`.
    ///
    /// The window is cut into `SEARCH_TASKS` equal contiguous sub-ranges of
    /// `range_size / SEARCH_TASKS` values each, so the scanned span is
    /// `[base, base + SEARCH_TASKS * (range_size / SEARCH_TASKS))` and the
    /// remainder is dropped. Sub-range results are concatenated in window
    /// order, so the output is ascending without a sort.
    pub fn search(
        &self,
        account_id: u64,
        range_size: usize,
    ) -> Result<DistributedPrimeResult, PrimeError> {
        let stopwatch = Stopwatch::start();
        let window = search_window(account_id, range_size)?;

        let handles = self
            .pool
            .submit_all(split_window(&window, SEARCH_TASKS).into_iter().map(|range| {
                move || range.filter(|&n| is_prime(n)).collect::<Vec<u64>>()
            }))?;

        let primes: Vec<u64> = join_all(handles)?.into_iter().flatten().collect();
        let result = DistributedPrimeResult {
            total_primes: primes.len(),
            primes,
            computation_time_nanos: stopwatch.elapsed_nanos(),
        };

        tracing::info!(
            account_id,
            range_size,
            total_primes = result.total_primes,
            elapsed_nanos = result.computation_time_nanos,
            "Prime search complete."
        );
        Ok(result)
    }

    /// Looks up the `(account_id % 10_000 + 1000)`th prime and reports whether it is odd.
    pub fn check_prime_account(&self, account_id: u64) -> Result<PrimeAccountCheck, PrimeError> {
        let stopwatch = Stopwatch::start();
        let n = account_id % ACCOUNT_CHECK_MODULUS + ACCOUNT_CHECK_OFFSET;

        let nth = self.pool.submit(move || nth_prime(n))?.wait()?.ok_or_else(|| {
            CoreError::invalid("account_id", format!("no prime at position {n}"))
        })?;

        let check = PrimeAccountCheck {
            account_id,
            n,
            nth_prime: nth,
            is_prime_account: nth % 2 == 1,
            computation_time_nanos: stopwatch.elapsed_nanos(),
        };
        tracing::debug!(account_id, n, nth_prime = nth, "Prime account check complete.");
        Ok(check)
    }
}

fn search_window(account_id: u64, range_size: usize) -> Result<Range<u64>, CoreError> {
    if range_size == 0 {
        return Err(CoreError::invalid("range_size", "must be positive"));
    }
    let start = account_id
        .checked_mul(WINDOW_STRIDE)
        .ok_or_else(|| CoreError::invalid("account_id", "search window overflows u64"))?;
    let end = u64::try_from(range_size)
        .ok()
        .and_then(|size| start.checked_add(size))
        .ok_or_else(|| CoreError::invalid("range_size", "search window overflows u64"))?;
    Ok(start..end)
}

/// Cuts `window` into `parts` equal, contiguous, disjoint ranges.
///
/// Values past `parts * (len / parts)` are not covered.
fn split_window(window: &Range<u64>, parts: u64) -> Vec<Range<u64>> {
    let per_part = (window.end - window.start) / parts;
    (0..parts)
        .map(|k| {
            let start = window.start + k * per_part;
            start..start + per_part
        })
        .collect()
}
