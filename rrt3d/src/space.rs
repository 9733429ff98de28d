use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::obstacle::BBox;
use crate::point::*;

/// The region random samples are drawn from.
pub type Bounds = BBox;

/// Goal-biased uniform sampler over a fixed region.
///
/// With probability `goal_sample_rate` the goal itself is returned, otherwise each coordinate is
/// drawn uniformly and independently from the bounds. The sampler never looks at the tree, so the
/// sequence of samples depends only on the random source.
#[derive(Debug, Clone)]
pub struct GoalBiasedSampler {
    goal: Point,
    goal_sample_rate: f64,
    axes: [Uniform<f64>; 3],
}

impl GoalBiasedSampler {
    /// `bounds` must be finite with `min <= max` on every axis and `goal_sample_rate` must be in
    /// `[0, 1]`. `RRTBuilder` checks both before constructing a sampler.
    pub fn new(bounds: &Bounds, goal: Point, goal_sample_rate: f64) -> Self {
        let axis = |i: usize| Uniform::new_inclusive(bounds.min_corner[i], bounds.max_corner[i]);
        GoalBiasedSampler {
            goal,
            goal_sample_rate,
            axes: [axis(0), axis(1), axis(2)],
        }
    }

    pub fn goal(&self) -> &Point {
        &self.goal
    }

    pub fn goal_sample_rate(&self) -> f64 {
        self.goal_sample_rate
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        if rng.gen::<f64>() < self.goal_sample_rate {
            self.goal
        } else {
            self.sample_uniform(rng)
        }
    }

    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let [x, y, z] = &self.axes;
        point(x.sample(rng), y.sample(rng), z.sample(rng))
    }
}

/// Draws a single goal-biased sample. Prefer building a `GoalBiasedSampler` once in loops.
pub fn sample<R: Rng + ?Sized>(
    bounds: &Bounds,
    goal_sample_rate: f64,
    goal: &Point,
    rng: &mut R,
) -> Point {
    GoalBiasedSampler::new(bounds, *goal, goal_sample_rate).sample(rng)
}
