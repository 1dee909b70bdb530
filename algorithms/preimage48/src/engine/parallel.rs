//! Parallel Search Engine
//!
//! Shards a random search over rayon workers (`multithread` feature).
//!
//! 1. Each worker draws from its own `ChaCha8Rng`, seeded from the caller's
//!    generator and placed on a distinct ChaCha stream.
//! 2. The lookup tables are borrowed read-only by every worker.
//! 3. The first verified witness cancels the remaining workers.

use rand::RngCore;

use crate::engine::search::{search_serial, Attempt, SearchConfig, SearchStats};
use crate::types::SearchError;

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Number of workers a default search uses.
#[must_use]
pub fn available_workers() -> usize {
    #[cfg(feature = "multithread")]
    {
        rayon::current_num_threads()
    }
    #[cfg(not(feature = "multithread"))]
    {
        1
    }
}

/// Drive `trial` until it yields a witness or the budget runs out.
///
/// With one worker (or without the `multithread` feature) the samples come
/// straight from `rng`, so the result is reproducible for a given seed.
pub(crate) fn search<R, T, F>(
    rng: &mut R,
    config: &SearchConfig,
    label: &str,
    progress_every: u64,
    trial: F,
) -> Result<(T, SearchStats), SearchError>
where
    R: RngCore + ?Sized,
    T: Send,
    F: Fn(u64) -> Attempt<T> + Sync,
{
    #[cfg(feature = "multithread")]
    if config.workers > 1 {
        return sharded(rng, config, label, progress_every, &trial);
    }

    let (result, stats) = search_serial(
        rng,
        config.budget,
        &config.cancel,
        label,
        progress_every,
        &trial,
    );
    result.map(|value| (value, stats))
}

// =============================================================================
// SHARDING
// =============================================================================

#[cfg(feature = "multithread")]
fn sharded<R, T, F>(
    rng: &mut R,
    config: &SearchConfig,
    label: &str,
    progress_every: u64,
    trial: &F,
) -> Result<(T, SearchStats), SearchError>
where
    R: RngCore + ?Sized,
    T: Send,
    F: Fn(u64) -> Attempt<T> + Sync,
{
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rayon::prelude::*;

    let workers = config.workers;
    let stop = config.cancel.child();
    let seeds: Vec<u64> = (0..workers).map(|_| rng.next_u64()).collect();

    let outcomes: Vec<(Result<T, SearchError>, SearchStats)> = seeds
        .into_par_iter()
        .enumerate()
        .map(|(worker, seed)| {
            let mut local = ChaCha8Rng::seed_from_u64(seed);
            local.set_stream(worker as u64);
            let label = format!("{label}#{worker}");
            let outcome = search_serial(
                &mut local,
                config.budget.share(workers, worker),
                &stop,
                &label,
                progress_every,
                trial,
            );
            if outcome.0.is_ok() {
                stop.cancel();
            }
            outcome
        })
        .collect();

    // Duplicate discoveries are possible; the first one in worker order wins.
    let mut stats = SearchStats::default();
    let mut found = None;
    let mut failure = None;
    for (result, worker_stats) in outcomes {
        stats.merge(worker_stats);
        match result {
            Ok(value) => {
                found.get_or_insert(value);
            }
            Err(err) => {
                failure.get_or_insert(err);
            }
        }
    }

    match found {
        Some(value) => Ok((value, stats)),
        None => Err(failure
            .unwrap_or(SearchError::TrialsExhausted { trials: 0 })
            .with_trials(stats.trials)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
