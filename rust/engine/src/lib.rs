//! # cardsim-engine: Parallel Monte Carlo Deck Estimator
//!
//! Estimates how often a shuffled deck satisfies an event by running many
//! independent trials on a fixed pool of worker threads and summing their
//! tallies.
//!
//! ## Core Modules
//!
//! - [`rng`] - Per-thread multiply-with-carry generator and seeding helpers
//! - [`catalog`] - Immutable per-card attribute table shared by all workers
//! - [`deck`] - Card sequences with clone, shuffle and random pull
//! - [`event`] - The predicate trait and the per-worker trial context
//! - [`events`] - Built-in poker and trading-card events
//! - [`pool`] - Worker pool, iteration budgets, cancellation and run reports
//! - [`errors`] - Error types for construction and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use cardsim_engine::catalog::Catalog;
//! use cardsim_engine::deck::Deck;
//! use cardsim_engine::events::EventKind;
//! use cardsim_engine::pool;
//!
//! let catalog = Catalog::standard_52();
//! let decks = vec![Deck::full(&catalog)];
//!
//! // 2 workers x 500 trials each
//! let report = pool::run(2, 500, &EventKind::RoyalFlush, &decks).unwrap();
//! assert_eq!(report.total_iterations, 1_000);
//! println!("P = {:?}", report.probability());
//! ```
//!
//! ## Reproducible Runs
//!
//! ```rust
//! use cardsim_engine::catalog::Catalog;
//! use cardsim_engine::deck::Deck;
//! use cardsim_engine::events::EventKind;
//! use cardsim_engine::pool::{IterationBudget, PoolConfig, SeedPolicy, WorkerPool};
//!
//! let catalog = Catalog::standard_52();
//! let decks = vec![Deck::full(&catalog)];
//! let config = PoolConfig::new(3, IterationBudget::Total(3_000)).with_seed(SeedPolicy::Fixed(42));
//! let pool = WorkerPool::new(config).unwrap();
//!
//! let a = pool.run(&EventKind::FourOfAKind, &decks).unwrap();
//! let b = pool.run(&EventKind::FourOfAKind, &decks).unwrap();
//! assert_eq!(a.total_successes, b.total_successes);
//! ```

pub mod catalog;
pub mod deck;
pub mod errors;
pub mod event;
pub mod events;
pub mod pool;
pub mod rng;

pub use catalog::{Attribute, CardIndex, Catalog};
pub use deck::Deck;
pub use errors::EngineError;
pub use event::{Event, TrialContext};
pub use events::EventKind;
pub use pool::{
    CancelToken, IterationBudget, PoolConfig, RunReport, SeedPolicy, WorkerFailure, WorkerPool,
    WorkerReport,
};
pub use rng::{Multipliers, MwcRng};
