//! Plans a scenario with both planners and renders the trees and paths to a PNG.
//!
//! Usage: `cargo run --example plot_3d [scenario.json] [out.png] [seed]`

use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use rrt3d::{Point, RRTResult, RRTSimpleSolver, RRTStarSolver, Scenario};

const CLUTTERED: &str = include_str!("../scenarios/cluttered.json");

fn coords(p: &Point) -> (f64, f64, f64) {
    (p.x, p.y, p.z)
}

fn draw_result<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    scenario: &Scenario,
    result: &RRTResult,
    color: RGBColor,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let bounds = scenario
        .bounds
        .unwrap_or_else(|| scenario.builder::<RRTSimpleSolver>().get_bounds());
    let (min, max) = (bounds.min_corner, bounds.max_corner);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .build_cartesian_3d(min.x..max.x, min.y..max.y, min.z..max.z)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.7;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart.configure_axes().draw()?;

    chart.draw_series(scenario.obstacles.iter().flat_map(|obstacle| {
        obstacle
            .edges()
            .map(|(a, b)| PathElement::new(vec![coords(&a), coords(&b)], &BLACK))
            .collect::<Vec<_>>()
    }))?;

    let faded = color.mix(0.25);
    chart.draw_series(
        result
            .tree
            .edges()
            .map(|(a, b)| PathElement::new(vec![coords(a), coords(b)], &faded)),
    )?;

    if let Some(path) = &result.result {
        chart.draw_series(LineSeries::new(
            path.waypoints.iter().map(coords),
            color.stroke_width(3),
        ))?;
    }

    chart.draw_series([
        Circle::new(coords(&scenario.start), 6, GREEN.filled()),
        Circle::new(coords(&scenario.goal), 6, RED.filled()),
    ])?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(file) => Scenario::load(file)?,
        None => Scenario::from_json_str(CLUTTERED)?,
    };
    let out = args.next().unwrap_or_else(|| "rrt3d.png".to_string());
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0);

    let rrt = scenario
        .builder::<RRTSimpleSolver>()
        .solve(&mut StdRng::seed_from_u64(seed))?;
    let rrt_star = scenario
        .builder::<RRTStarSolver>()
        .solve(&mut StdRng::seed_from_u64(seed))?;

    for (name, result) in [("RRT", &rrt), ("RRT*", &rrt_star)] {
        match &result.result {
            Some(path) => println!(
                "{}: path of length {:.2} with {} waypoints, {} nodes",
                name,
                path.length(),
                path.len(),
                result.tree.len()
            ),
            None => println!("{}: no path after {} iterations", name, result.iterations),
        }
    }

    let root = BitMapBackend::new(&out, (1600, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(800);
    draw_result(&left, "RRT", &scenario, &rrt, BLUE)?;
    draw_result(&right, "RRT*", &scenario, &rrt_star, MAGENTA)?;
    root.present()?;

    println!("wrote {}", out);
    Ok(())
}
