use tracing::trace;

use crate::builder::RRTBuilder;
use crate::obstacle::Obstacle;
use crate::point::*;
use crate::solvers::{steer, RRTSolver, Workspace};
use crate::tree::Tree;

/// Plain RRT: every accepted node hangs off its nearest neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RRTSimpleSolver {
    expand_dist: f64,
}

impl RRTSimpleSolver {
    pub fn new(expand_dist: f64) -> Self {
        RRTSimpleSolver { expand_dist }
    }

    pub fn expand_dist(&self) -> f64 {
        self.expand_dist
    }
}

impl RRTSolver for RRTSimpleSolver {
    const NAME: &'static str = "RRT";

    fn from_builder<O: Obstacle>(builder: &RRTBuilder<Self, O>) -> Self {
        RRTSimpleSolver::new(builder.get_expand_dist())
    }

    fn extend<O: Obstacle>(
        &self,
        tree: &mut Tree,
        target: &Point,
        workspace: &Workspace<'_, O>,
    ) -> Option<usize> {
        let nearest_idx = tree.nearest(target);
        let nearest = *tree[nearest_idx].point();
        let candidate = steer(&nearest, target, self.expand_dist);

        if !workspace.segment_is_free(&nearest, &candidate) {
            trace!(from = nearest_idx, "candidate rejected by collision check");
            return None;
        }

        Some(tree.attach(candidate, nearest_idx))
    }
}
