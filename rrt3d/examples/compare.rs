//! Runs RRT and RRT* over the same seeds and prints summary statistics.
//!
//! Usage: `cargo run --release --example compare [trials] [scenario.json] [route.txt]`
//!
//! When a route file is given, the shortest RRT* path found is written to it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rrt3d::benchmark::{self, TrialOutcome};
use rrt3d::{waypoints, RRTSimpleSolver, RRTStarSolver, Scenario};

const CLUTTERED: &str = include_str!("../scenarios/cluttered.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let trials: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(200);
    let scenario = match args.next() {
        Some(file) => Scenario::load(file)?,
        None => Scenario::from_json_str(CLUTTERED)?,
    };
    let route = args.next();

    let rrt = scenario.builder::<RRTSimpleSolver>();
    let rrt_star = scenario.builder::<RRTStarSolver>();

    info!(trials, obstacles = scenario.obstacles.len(), "running comparison");
    let rrt_outcomes = run(trials, |rng| rrt.solve(rng))?;
    let rrt_star_outcomes = run(trials, |rng| rrt_star.solve(rng))?;

    let comparison = benchmark::compare(&rrt_outcomes, &rrt_star_outcomes);
    println!("RRT : {}", comparison.baseline);
    println!("RRT*: {}", comparison.candidate);
    if let Some(change) = comparison.length_change() {
        println!("mean length change: {:+.1}%", change * 100.0);
    }

    if let Some(route) = route {
        let best = rrt_star_outcomes
            .iter()
            .filter_map(|o| o.path_length.map(|length| (o.seed, length)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        match best {
            Some((seed, length)) => {
                let result = rrt_star.solve(&mut StdRng::seed_from_u64(seed))?;
                if let Some(path) = result.result {
                    waypoints::save_route(&route, &path)?;
                    println!("wrote route of length {:.2} (seed {}) to {}", length, seed, route);
                }
            }
            None => println!("no RRT* run succeeded, nothing written"),
        }
    }

    Ok(())
}

#[cfg(feature = "multithreaded")]
fn run<F>(trials: u64, plan: F) -> Result<Vec<TrialOutcome>, rrt3d::PlanError>
where
    F: Fn(&mut StdRng) -> Result<rrt3d::RRTResult, rrt3d::PlanError> + Sync,
{
    let seeds: Vec<u64> = (0..trials).collect();
    let threads = std::thread::available_parallelism().map_or(1, |n| n.get());
    benchmark::run_trials_parallel(&seeds, threads, plan)
}

#[cfg(not(feature = "multithreaded"))]
fn run<F>(trials: u64, plan: F) -> Result<Vec<TrialOutcome>, rrt3d::PlanError>
where
    F: Fn(&mut StdRng) -> Result<rrt3d::RRTResult, rrt3d::PlanError> + Sync,
{
    benchmark::run_trials(0..trials, plan)
}
