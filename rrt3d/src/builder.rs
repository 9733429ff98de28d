use std::marker::PhantomData;

use rand::Rng;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::iter::RRTIter;
use crate::obstacle::{BBox, CollisionChecker, Obstacle, MAX_COLLISION_SAMPLES};
use crate::point::*;
use crate::solvers::*;
use crate::space::{Bounds, GoalBiasedSampler};
use crate::RRTResult;

pub struct RRTBuilder<S: RRTSolver, O = BBox> {
    from: Point,
    to: Point,
    obstacles: Vec<O>,
    bounds: Option<Bounds>,
    expand_dist: Option<f64>,
    goal_sample_rate: Option<f64>,
    max_iters: Option<usize>,
    goal_tolerance: Option<f64>,
    collision_step: Option<f64>,
    max_radius: Option<f64>,
    gamma: Option<f64>,
    _solver: PhantomData<S>,
}

impl<S, O> RRTBuilder<S, O>
where
    S: RRTSolver,
    O: Obstacle,
{
    pub fn new(from: Point, to: Point) -> RRTBuilder<S, O> {
        RRTBuilder {
            from,
            to,
            obstacles: Vec::new(),
            bounds: None,
            expand_dist: None,
            goal_sample_rate: None,
            max_iters: None,
            goal_tolerance: None,
            collision_step: None,
            max_radius: None,
            gamma: None,
            _solver: PhantomData,
        }
    }

    pub fn add_obstacle(mut self, obstacle: O) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn extend_obstacles(mut self, obstacles: impl IntoIterator<Item = O>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds.replace(bounds);
        self
    }

    pub fn with_expand_dist(mut self, expand_dist: f64) -> Self {
        self.expand_dist.replace(expand_dist);
        self
    }

    pub fn with_goal_sample_rate(mut self, rate: f64) -> Self {
        self.goal_sample_rate.replace(rate);
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters.replace(max_iters);
        self
    }

    pub fn with_goal_tolerance(mut self, tolerance: f64) -> Self {
        self.goal_tolerance.replace(tolerance);
        self
    }

    pub fn with_collision_step(mut self, step: f64) -> Self {
        self.collision_step.replace(step);
        self
    }

    /// Upper bound of the RRT* neighbourhood radius. Ignored by plain RRT.
    pub fn with_max_radius(mut self, radius: f64) -> Self {
        self.max_radius.replace(radius);
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma.replace(gamma);
        self
    }

    /// Overrides every hyperparameter with the values of `config`.
    pub fn with_config(self, config: &PlannerConfig) -> Self {
        self.with_expand_dist(config.expand_dist)
            .with_goal_sample_rate(config.goal_sample_rate)
            .with_max_iters(config.max_iters)
            .with_goal_tolerance(config.goal_tolerance)
            .with_collision_step(config.collision_step)
            .with_max_radius(config.max_radius)
            .with_gamma(config.gamma)
    }

    /// Checks hyperparameters, start and goal coordinates, bounds, obstacles, then start and goal
    /// collisions, in that order, and reports the first problem found.
    pub fn validate(&self) -> Result<()> {
        let expand_dist = self.get_expand_dist();
        if !(expand_dist > 0.0 && expand_dist.is_finite()) {
            return Err(PlanError::ExpandDist(expand_dist));
        }
        let rate = self.get_goal_sample_rate();
        if !(0.0..=1.0).contains(&rate) {
            return Err(PlanError::GoalSampleRate(rate));
        }
        if self.get_max_iters() == 0 {
            return Err(PlanError::ZeroMaxIters);
        }
        let tolerance = self.get_goal_tolerance();
        if !(tolerance >= 0.0 && tolerance.is_finite()) {
            return Err(PlanError::GoalTolerance(tolerance));
        }
        let step = self.get_collision_step();
        if !(step > 0.0 && step.is_finite()) {
            return Err(PlanError::CollisionStep(step));
        }
        let max_radius = self.get_max_radius();
        if !(max_radius > 0.0) {
            return Err(PlanError::MaxRadius(max_radius));
        }
        let gamma = self.get_gamma();
        if !(gamma >= 0.0 && gamma.is_finite()) {
            return Err(PlanError::Gamma(gamma));
        }
        let length = self.longest_checked_segment();
        if length / step > (MAX_COLLISION_SAMPLES - 1) as f64 {
            return Err(PlanError::CollisionSamples { length, step });
        }

        let is_finite = |p: &Point| p.coords.iter().all(|c| c.is_finite());
        if !is_finite(&self.from) {
            return Err(PlanError::NonFiniteStart(self.from));
        }
        if !is_finite(&self.to) {
            return Err(PlanError::NonFiniteGoal(self.to));
        }

        let bounds = self.get_bounds();
        let unbounded_axis = || {
            Axis::ALL.into_iter().find(|axis| {
                let i = axis.index();
                // A finite span rules out infinite corners and keeps the sampler in range.
                !(bounds.max_corner[i] - bounds.min_corner[i]).is_finite()
            })
        };
        if let Some(axis) = bounds.malformed_axis().or_else(unbounded_axis) {
            return Err(PlanError::InvalidBounds { axis });
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if let Some(axis) = obstacle.bounding_box().malformed_axis() {
                return Err(PlanError::InvalidObstacle { index, axis });
            }
        }

        if let Some(index) = self.colliding_obstacle(&self.from) {
            return Err(PlanError::StartInCollision { index });
        }
        if let Some(index) = self.colliding_obstacle(&self.to) {
            return Err(PlanError::GoalInCollision { index });
        }

        Ok(())
    }

    /// Upper bound on the length of any segment a search passes to the collision checker: a
    /// steered step, a goal link, or an RRT* parent/rewire link inside the neighbourhood radius.
    fn longest_checked_segment(&self) -> f64 {
        let expand_dist = self.get_expand_dist();
        let rewire_reach = self
            .get_max_radius()
            .min(expand_dist * (1.0 + self.get_gamma()));
        expand_dist.max(self.get_goal_tolerance()).max(rewire_reach)
    }

    fn colliding_obstacle(&self, p: &Point) -> Option<usize> {
        self.obstacles.iter().position(|o| o.is_inside(p))
    }

    /// Validates the builder and returns an iterator that runs the search one iteration at a time.
    pub fn iter<'a, R>(&'a self, rng: &'a mut R) -> Result<RRTIter<'a, S, O, R>>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;

        let bounds = self.get_bounds();
        debug!(
            planner = S::NAME,
            from = ?self.from,
            to = ?self.to,
            obstacles = self.obstacles.len(),
            ?bounds,
            expand_dist = self.get_expand_dist(),
            max_iters = self.get_max_iters(),
            "starting search"
        );

        let workspace = Workspace::new(
            &self.obstacles,
            CollisionChecker::new(self.get_collision_step())?,
        );
        let sampler = GoalBiasedSampler::new(&bounds, self.to, self.get_goal_sample_rate());

        Ok(RRTIter::new(
            S::from_builder(self),
            self.from,
            self.to,
            self.get_goal_tolerance(),
            self.get_max_iters(),
            sampler,
            workspace,
            rng,
        ))
    }

    /// Runs the search to completion. Not finding a path is reported through
    /// `RRTResult::result`, not as an error.
    pub fn solve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RRTResult> {
        let result = self.iter(rng)?.finish();
        debug!(
            planner = S::NAME,
            found = result.result.is_some(),
            iterations = result.iterations,
            nodes = result.tree.len(),
            length = ?result.result.as_ref().map(|path| path.length()),
            "search finished"
        );
        Ok(result)
    }

    pub fn get_from(&self) -> Point {
        self.from
    }

    pub fn get_to(&self) -> Point {
        self.to
    }

    pub fn get_obstacles(&self) -> &[O] {
        self.obstacles.as_slice()
    }

    pub fn get_expand_dist(&self) -> f64 {
        self.expand_dist.unwrap_or(PlannerConfig::DEFAULT_EXPAND_DIST)
    }

    pub fn get_goal_sample_rate(&self) -> f64 {
        self.goal_sample_rate
            .unwrap_or(PlannerConfig::DEFAULT_GOAL_SAMPLE_RATE)
    }

    pub fn get_max_iters(&self) -> usize {
        self.max_iters.unwrap_or(PlannerConfig::DEFAULT_MAX_ITERS)
    }

    pub fn get_goal_tolerance(&self) -> f64 {
        self.goal_tolerance
            .unwrap_or(PlannerConfig::DEFAULT_GOAL_TOLERANCE)
    }

    pub fn get_collision_step(&self) -> f64 {
        self.collision_step
            .unwrap_or(crate::obstacle::DEFAULT_COLLISION_STEP)
    }

    pub fn get_max_radius(&self) -> f64 {
        self.max_radius.unwrap_or(star::DEFAULT_MAX_RADIUS)
    }

    pub fn get_gamma(&self) -> f64 {
        self.gamma.unwrap_or(star::DEFAULT_GAMMA)
    }

    /// The configured sampling region or, if there is none, the box spanned by start and goal
    /// padded by `expand_dist + goal_tolerance` on every side.
    pub fn get_bounds(&self) -> Bounds {
        self.bounds.unwrap_or_else(|| {
            let padding = self.get_expand_dist() + self.get_goal_tolerance();
            BBox::enclosing(&self.from, &self.to).padded(padding)
        })
    }
}

impl<O: Obstacle> RRTBuilder<RRTSimpleSolver, O> {
    #[inline(always)]
    pub fn new_simple(from: Point, to: Point) -> RRTBuilder<RRTSimpleSolver, O> {
        RRTBuilder::new(from, to)
    }
}

impl<O: Obstacle> RRTBuilder<RRTStarSolver, O> {
    #[inline(always)]
    pub fn new_star(from: Point, to: Point) -> RRTBuilder<RRTStarSolver, O> {
        RRTBuilder::new(from, to)
    }
}
