//! The `run` command: load inputs, drive the worker pool, print the estimate.
//!
//! Values are taken from the command line first, then the setup file, then
//! the layered configuration. A `--timeout-secs` watchdog cancels the pool
//! cooperatively; whatever the workers finished is still reported.

use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use cardsim_engine::{
    CancelToken, Catalog, Deck, EventKind, IterationBudget, Multipliers, PoolConfig, RunReport,
    SeedPolicy, WorkerPool,
};

use crate::cli::RunArgs;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::formatters;
use crate::io_utils;
use crate::loader::{self, Setup};
use crate::ui;

/// Fully resolved inputs of one run, before any file is read.
#[derive(Debug, Clone, PartialEq)]
struct RunPlan {
    event: EventKind,
    threads: usize,
    iterations: u64,
    seed: SeedPolicy,
    multipliers: Multipliers,
    inputs: Inputs,
}

#[derive(Debug, Clone, PartialEq)]
enum Inputs {
    Builtin52 { decks: Vec<PathBuf> },
    Files { catalog: PathBuf, decks: Vec<PathBuf> },
}

pub fn handle_run_command(
    args: RunArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let setup = args.setup.as_deref().map(loader::read_setup).transpose()?;
    let plan = plan_run(&args, setup, &resolved.config)?;
    tracing::info!(
        event = %plan.event,
        threads = plan.threads,
        iterations = plan.iterations,
        seed = ?plan.seed,
        "starting run"
    );

    let catalog = match &plan.inputs {
        Inputs::Builtin52 { .. } => Catalog::standard_52(),
        Inputs::Files { catalog, .. } => loader::load_catalog(catalog)?,
    };
    let decks = match &plan.inputs {
        Inputs::Builtin52 { decks } if decks.is_empty() => vec![Deck::full(&catalog)],
        Inputs::Builtin52 { decks } | Inputs::Files { decks, .. } => {
            loader::load_decks(&catalog, decks)?
        }
    };

    let report = execute(&plan, &decks, args.timeout_secs)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        writeln!(out, "{}", json)?;
    } else {
        for line in formatters::format_report(&report) {
            writeln!(out, "{}", line)?;
        }
    }
    for warning in formatters::report_warnings(&report) {
        ui::display_warning(err, &warning)?;
    }

    if let Some(path) = &args.output {
        io_utils::ensure_parent_dir(path).map_err(CliError::InvalidInput)?;
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        std::fs::write(path, json)?;
    }
    Ok(())
}

fn plan_run(args: &RunArgs, setup: Option<Setup>, config: &Config) -> Result<RunPlan, CliError> {
    let selector = args
        .event
        .or(setup.as_ref().map(|s| s.event))
        .ok_or_else(|| {
            CliError::InvalidInput("no event given; pass --event or a setup file".to_string())
        })?;
    let event = EventKind::from_selector(selector)?;

    let threads = args
        .threads
        .or(setup.as_ref().map(|s| s.threads))
        .unwrap_or(config.threads);
    let iterations = args.iterations.unwrap_or(config.iterations);
    if iterations == 0 {
        return Err(CliError::InvalidInput("iterations must be >= 1".to_string()));
    }
    let seed = match args.seed.or(config.seed) {
        Some(base) => SeedPolicy::Fixed(base),
        None => SeedPolicy::Entropy,
    };
    let [a, b] = config.multipliers;
    let multipliers = Multipliers::new(a, b)?;

    let inputs = if args.builtin_52 {
        Inputs::Builtin52 {
            decks: args.decks.clone(),
        }
    } else {
        let (setup_catalog, setup_decks) = match setup {
            Some(s) => (Some(s.catalog), s.decks),
            None => (None, Vec::new()),
        };
        let catalog = args.catalog.clone().or(setup_catalog).ok_or_else(|| {
            CliError::InvalidInput(
                "no catalog given; pass --catalog, --builtin-52 or a setup file".to_string(),
            )
        })?;
        let decks = if args.decks.is_empty() {
            setup_decks
        } else {
            args.decks.clone()
        };
        Inputs::Files { catalog, decks }
    };

    Ok(RunPlan {
        event,
        threads,
        iterations,
        seed,
        multipliers,
        inputs,
    })
}

fn execute(
    plan: &RunPlan,
    decks: &[Deck<'_>],
    timeout_secs: Option<u64>,
) -> Result<RunReport, CliError> {
    let cancel = CancelToken::new();
    let pool = WorkerPool::new(
        PoolConfig::new(plan.threads, IterationBudget::Total(plan.iterations))
            .with_seed(plan.seed)
            .with_multipliers(plan.multipliers)
            .with_cancel(cancel.clone()),
    )?;

    let Some(secs) = timeout_secs else {
        return Ok(pool.run(&plan.event, decks)?);
    };

    thread::scope(|s| -> Result<RunReport, CliError> {
        let (done_tx, done_rx) = mpsc::channel::<()>();
        thread::Builder::new()
            .name("cardsim-watchdog".to_string())
            .spawn_scoped(s, move || {
                if let Err(mpsc::RecvTimeoutError::Timeout) =
                    done_rx.recv_timeout(Duration::from_secs(secs))
                {
                    tracing::warn!(timeout_secs = secs, "timeout reached, cancelling run");
                    cancel.cancel();
                }
            })?;
        let result = pool.run(&plan.event, decks);
        drop(done_tx);
        Ok(result?)
    })
}
