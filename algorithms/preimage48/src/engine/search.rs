//! Search Control
//!
//! The birthday searches have no upper bound on the number of trials; they
//! are driven through [`Trials`], an iterator of random samples that stops on
//! a trial budget, a wall-clock deadline, or a [`CancelToken`]. The search
//! algorithm only decides what a sample means ([`Attempt`]).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::RngCore;

use crate::types::SearchError;

/// Trials between two checks of the cancellation token and the deadline.
const CHECK_INTERVAL: u64 = 1 << 12;

// =============================================================================
// CANCELLATION
// =============================================================================

/// Cooperative, clonable cancellation flag.
///
/// Searches poll it every few thousand trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every search holding this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.load(Ordering::Relaxed))
    }

    /// A token that fires with `self` but can also be cancelled on its own
    /// without touching `self`.
    #[cfg_attr(not(feature = "multithread"), allow(dead_code))]
    pub(crate) fn child(&self) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::clone(&self.flag)),
        }
    }
}

// =============================================================================
// BUDGET
// =============================================================================

/// Limits on a single search phase. `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    /// Maximum number of random trials.
    pub max_trials: Option<u64>,
    /// Maximum wall-clock time, measured from the start of the phase.
    pub deadline: Option<Duration>,
}

impl Budget {
    /// Search until success.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_trials: None,
            deadline: None,
        }
    }

    /// At most `n` trials.
    #[must_use]
    pub const fn trials(n: u64) -> Self {
        Self {
            max_trials: Some(n),
            deadline: None,
        }
    }

    /// At most `limit` of wall-clock time.
    #[must_use]
    pub const fn timeout(limit: Duration) -> Self {
        Self {
            max_trials: None,
            deadline: Some(limit),
        }
    }

    /// The trial cap of one worker out of `workers`.
    pub(crate) fn share(self, workers: usize, worker: usize) -> Self {
        let workers = workers.max(1) as u64;
        let worker = worker as u64;
        Self {
            max_trials: self
                .max_trials
                .map(|n| n / workers + u64::from(worker < n % workers)),
            deadline: self.deadline,
        }
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// How a random search is run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-phase limits.
    pub budget: Budget,
    /// Number of parallel workers. `1` runs on the caller's generator and is
    /// reproducible for a given seed.
    pub workers: usize,
    /// External cancellation.
    pub cancel: CancelToken,
}

impl SearchConfig {
    /// Single worker, unbounded.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            budget: Budget::unbounded(),
            workers: 1,
            cancel: CancelToken::new(),
        }
    }

    /// Replace the budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Replace the worker count.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Replace the cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl Default for SearchConfig {
    /// One worker per available thread, unbounded.
    fn default() -> Self {
        Self::sequential().with_workers(crate::engine::parallel::available_workers())
    }
}

// =============================================================================
// TRIALS
// =============================================================================

/// What a single random sample turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt<T> {
    /// Nothing in the bucket.
    Miss,
    /// Bucket hit rejected by the exact check.
    FalsePositive,
    /// Verified witness.
    Found(T),
}

/// Counters of a finished (or abandoned) search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Random samples consumed.
    pub trials: u64,
    /// Bucket hits that failed the exact check.
    pub false_positives: u64,
}

impl SearchStats {
    /// Accumulate another worker's counters.
    pub fn merge(&mut self, other: Self) {
        self.trials += other.trials;
        self.false_positives += other.false_positives;
    }
}

/// Iterator of random 64-bit samples, one per trial, bounded by a budget and
/// a cancellation token.
///
/// Once exhausted, [`Trials::stop_reason`] says why.
#[derive(Debug)]
pub struct Trials<'a, R: ?Sized> {
    rng: &'a mut R,
    budget: Budget,
    cancel: &'a CancelToken,
    started: Instant,
    count: u64,
    stopped: Option<SearchError>,
}

impl<'a, R: RngCore + ?Sized> Trials<'a, R> {
    /// Start a trial stream; the deadline clock starts now.
    pub fn new(rng: &'a mut R, budget: Budget, cancel: &'a CancelToken) -> Self {
        Self {
            rng,
            budget,
            cancel,
            started: Instant::now(),
            count: 0,
            stopped: None,
        }
    }

    /// Samples handed out so far.
    #[must_use]
    pub const fn performed(&self) -> u64 {
        self.count
    }

    /// Why the stream ended, once it has.
    #[must_use]
    pub const fn stop_reason(&self) -> Option<SearchError> {
        self.stopped
    }

    fn check_limits(&self) -> Option<SearchError> {
        let trials = self.count;
        if self.budget.max_trials.is_some_and(|max| trials >= max) {
            return Some(SearchError::TrialsExhausted { trials });
        }
        if trials % CHECK_INTERVAL == 0 {
            if self.cancel.is_cancelled() {
                return Some(SearchError::Cancelled { trials });
            }
            if self
                .budget
                .deadline
                .is_some_and(|limit| self.started.elapsed() >= limit)
            {
                return Some(SearchError::DeadlineExceeded { trials });
            }
        }
        None
    }
}

impl<R: RngCore + ?Sized> Iterator for Trials<'_, R> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.stopped.is_some() {
            return None;
        }
        if let Some(reason) = self.check_limits() {
            self.stopped = Some(reason);
            return None;
        }
        self.count += 1;
        Some(self.rng.next_u64())
    }
}

// =============================================================================
// SERIAL DRIVER
// =============================================================================

/// Run `trial` on samples from `rng` until it finds a witness or the stream
/// stops. Statistics are returned in both cases.
pub(crate) fn search_serial<R, T, F>(
    rng: &mut R,
    budget: Budget,
    cancel: &CancelToken,
    label: &str,
    progress_every: u64,
    trial: &F,
) -> (Result<T, SearchError>, SearchStats)
where
    R: RngCore + ?Sized,
    F: Fn(u64) -> Attempt<T>,
{
    let mut stats = SearchStats::default();
    let mut trials = Trials::new(rng, budget, cancel);
    let mut n = 0u64;

    for sample in trials.by_ref() {
        n += 1;
        match trial(sample) {
            Attempt::Miss => {}
            Attempt::FalsePositive => {
                stats.false_positives += 1;
                trace!("{label}: false positive at trial {n}");
            }
            Attempt::Found(value) => {
                stats.trials = n;
                debug!("{label}: witness after {n} trials");
                return (Ok(value), stats);
            }
        }
        if n % progress_every == 0 {
            debug!(
                "{label}: {n} trials, {} false positives",
                stats.false_positives
            );
        }
    }

    stats.trials = trials.performed();
    let reason = trials
        .stop_reason()
        .unwrap_or(SearchError::TrialsExhausted { trials: stats.trials });
    (Err(reason), stats)
}

// =============================================================================
// TESTS
// =============================================================================
