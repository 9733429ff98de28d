pub mod simple;
pub mod star;

pub use simple::RRTSimpleSolver;
pub use star::RRTStarSolver;

use crate::builder::RRTBuilder;
use crate::obstacle::{CollisionChecker, Obstacle};
use crate::point::*;
use crate::tree::Tree;

/// Below this distance `steer` lands exactly on the target instead of normalizing.
pub const STEER_EPSILON: f64 = 1e-9;

/// A tree growth strategy. Each call to `extend` grows the tree by at most one node.
pub trait RRTSolver: Sized {
    const NAME: &'static str;

    fn from_builder<O: Obstacle>(builder: &RRTBuilder<Self, O>) -> Self;

    /// Extends the tree towards `target`. Returns the index of the inserted node, or `None` if
    /// the candidate was rejected by the collision check.
    fn extend<O: Obstacle>(
        &self,
        tree: &mut Tree,
        target: &Point,
        workspace: &Workspace<'_, O>,
    ) -> Option<usize>;
}

/// Obstacles plus the collision checker used against them.
pub struct Workspace<'a, O> {
    obstacles: &'a [O],
    checker: CollisionChecker,
}

impl<'a, O: Obstacle> Workspace<'a, O> {
    pub fn new(obstacles: &'a [O], checker: CollisionChecker) -> Self {
        Workspace { obstacles, checker }
    }

    pub fn obstacles(&self) -> &'a [O] {
        self.obstacles
    }

    pub fn checker(&self) -> &CollisionChecker {
        &self.checker
    }

    #[inline]
    pub fn segment_is_free(&self, a: &Point, b: &Point) -> bool {
        self.checker.segment_is_free(a, b, self.obstacles)
    }
}

/// Moves exactly `step` from `from` in the direction of `towards`.
///
/// The result is not clamped to `towards`: a target closer than `step` is overshot. Only when
/// the two points (almost) coincide is `towards` itself returned.
pub fn steer(from: &Point, towards: &Point, step: f64) -> Point {
    let direction = towards - from;
    let dist = direction.norm();
    if dist < STEER_EPSILON {
        *towards
    } else {
        from + direction * (step / dist)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn steer_moves_exactly_one_step() {
        let from = point(1.0, 1.0, 1.0);
        let to = point(4.0, 5.0, 1.0);
        let p = steer(&from, &to, 1.0);
        assert_relative_eq!(distance(&from, &p), 1.0);
        assert_abs_diff_eq!(p, point(1.6, 1.8, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn steer_overshoots_close_targets() {
        let from = point(0.0, 0.0, 0.0);
        let p = steer(&from, &point(0.3, 0.0, 0.0), 1.0);
        assert_abs_diff_eq!(p, point(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn steer_degenerate_returns_target() {
        let from = point(2.0, 2.0, 2.0);
        assert_eq!(steer(&from, &from, 1.0), from);
        let almost = point(2.0 + 1e-10, 2.0, 2.0);
        assert_eq!(steer(&from, &almost, 1.0), almost);
    }
}
