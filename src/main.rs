//! Run pipeline: configuration → node CSV → seed route → improver → reports.

use std::fs;
use std::process::ExitCode;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seqroute::alns::AlnsEngine;
use seqroute::bounds::{lower_bound, upper_bound};
use seqroute::constructive::naive_sequence;
use seqroute::distance::DistanceCache;
use seqroute::edges::EdgeValidator;
use seqroute::evaluation::RouteEvaluator;
use seqroute::io::{read_nodes, write_bounds, write_summary, Config, OptimiserKind};
use seqroute::local_search::LocalSearch;
use seqroute::models::NodeStore;
use seqroute::sa::SimulatedAnnealing;
use seqroute::search::{Callback, Improver};
use seqroute::Error;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_directive())),
        )
        .init();

    let nodes = read_nodes(&config.data_nodes_filepath)?;
    let store = NodeStore::from_nodes(nodes);
    info!(nodes = store.len(), "loaded instance");
    if store.len() < 2 {
        warn!("instance has fewer than two nodes; reports will be degenerate");
    }

    let distances = DistanceCache::new(store.len());
    let edges = EdgeValidator::for_store(&store);
    let evaluator = RouteEvaluator::new(&store, &distances, &edges);

    fs::create_dir_all(&config.output_dir)?;
    let bounds_path = write_bounds(
        &config.output_dir,
        upper_bound(&store, &distances),
        lower_bound(&store, &distances),
    )?;
    info!(path = %bounds_path.display(), "wrote bounds");

    let seed_route = naive_sequence(&store);
    let termination = config.termination();
    let mut callback = Callback::new();

    let mut improver: Box<dyn Improver + '_> = match config.optimiser {
        OptimiserKind::LocalSearch => {
            Box::new(LocalSearch::new(&evaluator, termination, config.seed))
        }
        OptimiserKind::SimulatedAnnealing => {
            Box::new(SimulatedAnnealing::new(&evaluator, termination, config.seed))
        }
        OptimiserKind::Alns => Box::new(AlnsEngine::new(
            &evaluator,
            &store,
            &distances,
            &edges,
            termination,
            config.seed,
        )),
    };

    let mut best_routes = improver.improve(&seed_route, &mut callback);
    let best = best_routes.pop().unwrap_or(seed_route);

    info!(
        route = %best,
        objective = evaluator.objective(&best),
        iterations = callback.iterations().len(),
        "search finished"
    );
    if !evaluator.is_valid(&best) {
        // Reported, not fatal: the exit code stays zero.
        warn!("best route violates the sequence constraints");
    }

    let summary_path = write_summary(&config.output_dir, &best, &evaluator)?;
    info!(path = %summary_path.display(), "wrote summary");

    callback.iterations_to_file(&config.output_dir.join("iterations.json"))?;
    if !callback.routes().is_empty() {
        callback.routes_to_file(&config.output_dir.join("routes.json"))?;
    }

    Ok(())
}
