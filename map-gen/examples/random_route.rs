//! Generates a random obstacle map, plans through it with RRT* and writes the route.
//!
//! Usage: `cargo run -p map-gen --example random_route [seed] [route.txt] [centres.txt]`

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use map_gen::{cubes_from_centers, generate_centers, reference_region, save_centers};
use rrt3d::waypoints::save_route;
use rrt3d::{point, BBox, RRTBuilder, RRTStarSolver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0);
    let route = args.next().unwrap_or_else(|| "route.txt".to_string());
    let centres = args.next();

    let mut rng = StdRng::seed_from_u64(seed);
    let centers = generate_centers(&mut rng, map_gen::REFERENCE_COUNT, &reference_region())?;
    let obstacles = cubes_from_centers(&centers, map_gen::REFERENCE_HALF_EXTENT)?;
    if let Some(file) = centres {
        save_centers(&file, &centers)?;
    }

    let start = point(-1.0, -1.0, 0.0);
    let goal = point(7.0, 7.0, 7.0);
    let builder = RRTBuilder::<RRTStarSolver, BBox>::new(start, goal)
        .extend_obstacles(obstacles)
        .with_bounds(BBox::from_extents(-2.0, 8.0, -2.0, 8.0, -1.0, 8.0))
        .with_expand_dist(0.5)
        .with_max_iters(3000);

    let result = builder.solve(&mut rng)?;
    match result.result {
        Some(path) => {
            save_route(&route, &path)?;
            println!("{} waypoints, length {:.2}, written to {}", path.len(), path.length(), route);
        }
        None => println!("no path after {} iterations", result.iterations),
    }
    Ok(())
}
