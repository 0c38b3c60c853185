//! Fork-join worker pool.
//!
//! The pool borrows the shared decks (and through them the catalog) for the
//! duration of a [`std::thread::scope`], so nothing needs reference counting
//! or locks. Each worker:
//!
//! 1. seeds a private [`MwcRng`],
//! 2. clones every shared deck into storage it owns,
//! 3. runs its share of the budget, checking the [`CancelToken`] once per
//!    trial,
//! 4. returns a [`WorkerReport`] through its join handle.
//!
//! Spawning stops at the first worker that cannot be started; workers that
//! did start are still joined and aggregated. A worker that panics loses
//! only its own contribution. Both cases are listed in
//! [`RunReport::failures`].
//!
//! ```
//! use cardsim_engine::catalog::Catalog;
//! use cardsim_engine::deck::Deck;
//! use cardsim_engine::events::EventKind;
//! use cardsim_engine::pool::{IterationBudget, PoolConfig, SeedPolicy, WorkerPool};
//!
//! let catalog = Catalog::standard_52();
//! let decks = vec![Deck::full(&catalog)];
//! let config = PoolConfig::new(2, IterationBudget::Total(1_000)).with_seed(SeedPolicy::Fixed(7));
//! let report = WorkerPool::new(config)
//!     .unwrap()
//!     .run(&EventKind::FourOfAKind, &decks)
//!     .unwrap();
//! assert_eq!(report.total_iterations, 1_000);
//! assert!(report.total_successes <= report.total_iterations);
//! ```

use std::any::Any;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::deck::Deck;
use crate::errors::EngineError;
use crate::event::{Event, TrialContext};
use crate::rng::{derived_seed_pair, entropy_seed_pair, Multipliers, MwcRng};

/// Cooperative stop signal shared between the caller and every worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationBudget {
    /// Every worker runs this many trials.
    PerThread(u64),
    /// Split across workers; the first `total % threads` workers run one extra.
    Total(u64),
}

impl IterationBudget {
    /// Trials assigned to `worker` out of `threads`.
    pub fn share(&self, threads: usize, worker: usize) -> u64 {
        match *self {
            IterationBudget::PerThread(n) => n,
            IterationBudget::Total(n) => {
                let threads = threads.max(1) as u64;
                let base = n / threads;
                let extra = u64::from((worker as u64) < n % threads);
                base + extra
            }
        }
    }

    pub fn total(&self, threads: usize) -> u64 {
        match *self {
            IterationBudget::PerThread(n) => n.saturating_mul(threads as u64),
            IterationBudget::Total(n) => n,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Wall-clock time mixed with each worker's thread identity.
    Entropy,
    /// Per-worker seeds derived from one base value; runs are reproducible.
    Fixed(u64),
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub threads: usize,
    pub iterations: IterationBudget,
    pub seed: SeedPolicy,
    pub multipliers: Multipliers,
    pub cancel: Option<CancelToken>,
}

impl PoolConfig {
    pub fn new(threads: usize, iterations: IterationBudget) -> Self {
        Self {
            threads,
            iterations,
            seed: SeedPolicy::Entropy,
            multipliers: Multipliers::default(),
            cancel: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_multipliers(mut self, multipliers: Multipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// What one worker hands back when it finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub worker: usize,
    /// Seed pair the worker's generator started from.
    pub seed: (u32, u32),
    pub iterations: u64,
    pub successes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkerFailure {
    /// The OS refused the thread; no later worker was attempted.
    StartFailed { worker: usize, reason: String },
    /// The worker panicked; its partial tally is lost.
    Panicked { worker: usize, reason: String },
}

impl WorkerFailure {
    pub fn worker(&self) -> usize {
        match self {
            WorkerFailure::StartFailed { worker, .. } | WorkerFailure::Panicked { worker, .. } => {
                *worker
            }
        }
    }
}

impl std::fmt::Display for WorkerFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerFailure::StartFailed { worker, reason } => {
                write!(f, "worker {} failed to start: {}", worker, reason)
            }
            WorkerFailure::Panicked { worker, reason } => {
                write!(f, "worker {} panicked: {}", worker, reason)
            }
        }
    }
}

/// Aggregate of every joined worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub event: String,
    pub workers_requested: usize,
    pub requested_iterations: u64,
    pub total_iterations: u64,
    pub total_successes: u64,
    pub workers: Vec<WorkerReport>,
    pub failures: Vec<WorkerFailure>,
    pub cancelled: bool,
}

impl RunReport {
    /// Successes over executed iterations; `None` when nothing ran.
    pub fn probability(&self) -> Option<f64> {
        if self.total_iterations == 0 {
            return None;
        }
        Some(self.total_successes as f64 / self.total_iterations as f64)
    }

    pub fn percentage(&self) -> Option<f64> {
        self.probability().map(|p| p * 100.0)
    }

    /// Every requested trial ran and no worker was lost.
    pub fn is_complete(&self) -> bool {
        !self.cancelled
            && self.failures.is_empty()
            && self.total_iterations == self.requested_iterations
    }
}

#[derive(Debug, Clone)]
pub struct WorkerPool {
    config: PoolConfig,
}

impl WorkerPool {
    /// A pool needs at least one worker.
    pub fn new(config: PoolConfig) -> Result<Self, EngineError> {
        if config.threads == 0 {
            return Err(EngineError::InvalidThreadCount);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Run the configured budget of `event` trials over `decks`.
    ///
    /// Every deck must reference the same catalog, and the event must accept
    /// that catalog; both are checked before any thread starts.
    pub fn run<E>(&self, event: &E, decks: &[Deck<'_>]) -> Result<RunReport, EngineError>
    where
        E: Event + ?Sized,
    {
        let catalog = match decks.first() {
            Some(deck) => deck.catalog(),
            None => return Err(EngineError::NoDecks),
        };
        if decks.iter().any(|d| !std::ptr::eq(d.catalog(), catalog)) {
            return Err(EngineError::MalformedInput(
                "all decks must reference the same catalog".into(),
            ));
        }
        event.validate(catalog)?;

        let threads = self.config.threads;
        let budget = self.config.iterations;
        let seed_policy = self.config.seed;
        let multipliers = self.config.multipliers;
        let cancel = self.config.cancel.as_ref();

        info!(
            event = event.name(),
            threads,
            iterations = budget.total(threads),
            decks = decks.len(),
            "starting simulation"
        );

        let (workers, failures) = thread::scope(|scope| {
            let (handles, start_failure) = launch_workers(threads, |worker| {
                let job = WorkerJob {
                    worker,
                    iterations: budget.share(threads, worker),
                    seed_policy,
                    multipliers,
                    cancel,
                };
                thread::Builder::new()
                    .name(format!("cardsim-worker-{}", worker))
                    .spawn_scoped(scope, move || job.run(event, decks))
            });

            let mut workers = Vec::with_capacity(handles.len());
            let mut failures: Vec<WorkerFailure> = start_failure.into_iter().collect();
            for (worker, handle) in handles {
                match handle.join() {
                    Ok(report) => workers.push(report),
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        warn!(worker, reason = %reason, "worker panicked; dropping its tally");
                        failures.push(WorkerFailure::Panicked { worker, reason });
                    }
                }
            }
            (workers, failures)
        });

        // A token fired after every worker finished its share does not count.
        let cancelled = workers
            .iter()
            .any(|w| w.iterations < budget.share(threads, w.worker));
        let report = RunReport {
            event: event.name().to_string(),
            workers_requested: threads,
            requested_iterations: budget.total(threads),
            total_iterations: workers.iter().map(|w| w.iterations).sum(),
            total_successes: workers.iter().map(|w| w.successes).sum(),
            workers,
            failures,
            cancelled,
        };

        info!(
            iterations = report.total_iterations,
            successes = report.total_successes,
            failures = report.failures.len(),
            cancelled = report.cancelled,
            "simulation finished"
        );
        Ok(report)
    }
}

/// One-shot form: `thread_count` workers, each running
/// `iterations_per_thread` trials from entropy seeds.
pub fn run<E>(
    thread_count: usize,
    iterations_per_thread: u64,
    event: &E,
    decks: &[Deck<'_>],
) -> Result<RunReport, EngineError>
where
    E: Event + ?Sized,
{
    let config = PoolConfig::new(thread_count, IterationBudget::PerThread(iterations_per_thread));
    WorkerPool::new(config)?.run(event, decks)
}

/// Everything a worker needs besides the shared borrows.
#[derive(Clone, Copy)]
struct WorkerJob<'a> {
    worker: usize,
    iterations: u64,
    seed_policy: SeedPolicy,
    multipliers: Multipliers,
    cancel: Option<&'a CancelToken>,
}

impl WorkerJob<'_> {
    fn run<E>(self, event: &E, decks: &[Deck<'_>]) -> WorkerReport
    where
        E: Event + ?Sized,
    {
        let seed = match self.seed_policy {
            SeedPolicy::Entropy => entropy_seed_pair(),
            SeedPolicy::Fixed(base) => derived_seed_pair(base, self.worker),
        };
        let mut rng = MwcRng::new(self.multipliers);
        rng.seed(seed.0, seed.1);
        debug!(worker = self.worker, iterations = self.iterations, "worker seeded");

        let catalog = decks[0].catalog();
        let mut owned: Vec<Deck<'_>> = decks.to_vec();
        let mut ctx = TrialContext::new(catalog, &mut owned, &mut rng);

        let mut iterations = 0u64;
        let mut successes = 0u64;
        while iterations < self.iterations {
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                debug!(worker = self.worker, iterations, "worker cancelled");
                break;
            }
            if event.evaluate(&mut ctx) {
                successes += 1;
            }
            iterations += 1;
        }

        debug!(worker = self.worker, iterations, successes, "worker finished");
        WorkerReport {
            worker: self.worker,
            seed,
            iterations,
            successes,
        }
    }
}

/// Start up to `count` workers through `spawn`, stopping at the first error.
fn launch_workers<H, F>(count: usize, mut spawn: F) -> (Vec<(usize, H)>, Option<WorkerFailure>)
where
    F: FnMut(usize) -> io::Result<H>,
{
    let mut started = Vec::with_capacity(count);
    for worker in 0..count {
        match spawn(worker) {
            Ok(handle) => started.push((worker, handle)),
            Err(err) => {
                warn!(
                    worker,
                    started = started.len(),
                    error = %err,
                    "could not start worker; continuing with those already running"
                );
                let failure = WorkerFailure::StartFailed {
                    worker,
                    reason: err.to_string(),
                };
                return (started, Some(failure));
            }
        }
    }
    (started, None)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_budget_partitions_exactly() {
        let budget = IterationBudget::Total(10);
        let shares: Vec<u64> = (0..4).map(|w| budget.share(4, w)).collect();
        assert_eq!(shares, vec![3, 3, 2, 2]);
        assert_eq!(shares.iter().sum::<u64>(), budget.total(4));

        let even = IterationBudget::Total(2_500_000);
        assert!((0..4).all(|w| even.share(4, w) == 625_000));
    }

    #[test]
    fn per_thread_budget_multiplies() {
        let budget = IterationBudget::PerThread(625_000);
        assert_eq!(budget.share(4, 3), 625_000);
        assert_eq!(budget.total(4), 2_500_000);
    }

    #[test]
    fn zero_threads_rejected() {
        let config = PoolConfig::new(0, IterationBudget::Total(10));
        assert_eq!(WorkerPool::new(config).unwrap_err(), EngineError::InvalidThreadCount);
    }

    #[test]
    fn launch_stops_at_first_spawn_error() {
        let mut attempts = Vec::new();
        let (started, failure) = launch_workers(5, |worker| {
            attempts.push(worker);
            if worker == 2 {
                Err(io::Error::other("resource limit"))
            } else {
                Ok(worker * 10)
            }
        });

        assert_eq!(attempts, vec![0, 1, 2]);
        assert_eq!(started, vec![(0, 0), (1, 10)]);
        assert_eq!(
            failure,
            Some(WorkerFailure::StartFailed {
                worker: 2,
                reason: "resource limit".into()
            })
        );
    }

    #[test]
    fn partial_start_still_aggregates_started_threads() {
        let (reports, failure) = thread::scope(|scope| {
            let (handles, failure) = launch_workers(4, |worker| {
                if worker == 3 {
                    return Err(io::Error::other("no more threads"));
                }
                thread::Builder::new().spawn_scoped(scope, move || (worker as u64 + 1) * 100)
            });
            let reports: Vec<u64> = handles
                .into_iter()
                .map(|(_, h)| h.join().unwrap())
                .collect();
            (reports, failure)
        });
        assert_eq!(reports.iter().sum::<u64>(), 600);
        assert_eq!(failure.map(|f| f.worker()), Some(3));
    }

    #[test]
    fn launch_without_errors_starts_all() {
        let (started, failure) = launch_workers(3, |w| Ok::<_, io::Error>(w));
        assert_eq!(started.len(), 3);
        assert!(failure.is_none());
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn panic_messages_are_extracted() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }

    #[test]
    fn probability_requires_iterations() {
        let mut report = RunReport {
            event: "x".into(),
            workers_requested: 1,
            requested_iterations: 0,
            total_iterations: 0,
            total_successes: 0,
            workers: vec![],
            failures: vec![],
            cancelled: false,
        };
        assert_eq!(report.probability(), None);
        report.total_iterations = 4;
        report.total_successes = 1;
        assert_eq!(report.probability(), Some(0.25));
        assert_eq!(report.percentage(), Some(25.0));
    }
}
