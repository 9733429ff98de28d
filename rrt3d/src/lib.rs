//! Sampling-based path planning for a point agent among axis-aligned boxes in 3D.
//!
//! Two planners share one search loop: plain RRT and an RRT* variant that picks the cheapest
//! parent among nearby nodes and rewires its neighbourhood. Both stop at the first node that
//! lands within the goal tolerance. Use [`plan_rrt`] / [`plan_rrt_star`] for one-shot planning or
//! [`RRTBuilder`] for full control, including stepping through a search with [`RRTIter`].

pub mod benchmark;
pub mod builder;
pub mod config;
pub mod error;
pub mod iter;
pub mod obstacle;
pub mod path;
pub mod point;
pub mod solvers;
pub mod space;
pub mod tree;
pub mod waypoints;

mod utils;

pub use builder::RRTBuilder;
pub use config::{PlannerConfig, Scenario};
pub use error::{ConfigError, PlanError, WaypointError};
pub use iter::{RRTIter, Step};
pub use obstacle::{segment_is_free, BBox, CollisionChecker, Obstacle};
pub use path::{path_length, Path};
pub use point::{distance, point, Point};
pub use solvers::{steer, RRTSimpleSolver, RRTSolver, RRTStarSolver};
pub use space::{sample, Bounds, GoalBiasedSampler};
pub use tree::{Node, Tree};

use rand::Rng;

/// Everything a finished search leaves behind.
#[derive(Debug, Clone)]
pub struct RRTResult {
    pub tree: Tree,
    /// Iterations actually run, at most `max_iters`.
    pub iterations: usize,
    /// `None` if the goal was not reached within the iteration budget.
    pub result: Option<Path>,
}

impl RRTResult {
    pub fn found(&self) -> bool {
        self.result.is_some()
    }
}

/// Plans with plain RRT. `Ok(None)` means no path was found within `max_iter` iterations.
#[allow(clippy::too_many_arguments)]
pub fn plan_rrt<R: Rng + ?Sized>(
    start: Point,
    goal: Point,
    obstacles: &[BBox],
    bounds: Bounds,
    expand_dist: f64,
    goal_sample_rate: f64,
    max_iter: usize,
    goal_tolerance: f64,
    rng: &mut R,
) -> Result<Option<Path>, PlanError> {
    let builder = RRTBuilder::<RRTSimpleSolver, &BBox>::new(start, goal)
        .extend_obstacles(obstacles.iter())
        .with_bounds(bounds)
        .with_expand_dist(expand_dist)
        .with_goal_sample_rate(goal_sample_rate)
        .with_max_iters(max_iter)
        .with_goal_tolerance(goal_tolerance);
    Ok(builder.solve(rng)?.result)
}

/// Plans with RRT*. `Ok(None)` means no path was found within `max_iter` iterations.
#[allow(clippy::too_many_arguments)]
pub fn plan_rrt_star<R: Rng + ?Sized>(
    start: Point,
    goal: Point,
    obstacles: &[BBox],
    bounds: Bounds,
    expand_dist: f64,
    goal_sample_rate: f64,
    max_iter: usize,
    goal_tolerance: f64,
    max_radius: f64,
    rng: &mut R,
) -> Result<Option<Path>, PlanError> {
    let builder = RRTBuilder::<RRTStarSolver, &BBox>::new(start, goal)
        .extend_obstacles(obstacles.iter())
        .with_bounds(bounds)
        .with_expand_dist(expand_dist)
        .with_goal_sample_rate(goal_sample_rate)
        .with_max_iters(max_iter)
        .with_goal_tolerance(goal_tolerance)
        .with_max_radius(max_radius);
    Ok(builder.solve(rng)?.result)
}
