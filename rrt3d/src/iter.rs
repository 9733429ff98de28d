use rand::Rng;

use crate::obstacle::Obstacle;
use crate::path::Path;
use crate::point::*;
use crate::solvers::{RRTSolver, Workspace};
use crate::space::GoalBiasedSampler;
use crate::tree::Tree;
use crate::RRTResult;

/// Outcome of a single search iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The steered candidate collided and was discarded.
    Rejected,
    /// A node was inserted at this index.
    Extended(usize),
    /// A node landed within the goal tolerance and the goal was attached at this index.
    Reached(usize),
}

impl Step {
    pub fn node(&self) -> Option<usize> {
        match *self {
            Step::Rejected => None,
            Step::Extended(idx) | Step::Reached(idx) => Some(idx),
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Step::Reached(_))
    }
}

/// Runs a search one iteration per `next`.
///
/// A node counts as reaching the goal when it is strictly closer than the goal tolerance and the
/// link to the goal passes the collision check, so every segment of a returned path is free.
///
/// Yields at most `max_iters` steps and nothing after `Step::Reached`. Dropping the iterator
/// early is how a caller enforces a time budget; `finish` then reports whatever was found so far.
pub struct RRTIter<'a, S, O, R: ?Sized> {
    solver: S,
    tree: Tree,
    sampler: GoalBiasedSampler,
    workspace: Workspace<'a, O>,
    goal: Point,
    goal_tolerance: f64,
    max_iters: usize,
    iters: usize,
    reached: Option<usize>,
    rng: &'a mut R,
}

impl<'a, S, O, R> RRTIter<'a, S, O, R>
where
    S: RRTSolver,
    O: Obstacle,
    R: Rng + ?Sized,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        solver: S,
        from: Point,
        goal: Point,
        goal_tolerance: f64,
        max_iters: usize,
        sampler: GoalBiasedSampler,
        workspace: Workspace<'a, O>,
        rng: &'a mut R,
    ) -> Self {
        RRTIter {
            solver,
            tree: Tree::with_capacity(from, max_iters.min(1 << 16) + 2),
            sampler,
            workspace,
            goal,
            goal_tolerance,
            max_iters,
            iters: 0,
            reached: None,
            rng,
        }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn workspace(&self) -> &Workspace<'a, O> {
        &self.workspace
    }

    pub fn goal(&self) -> &Point {
        &self.goal
    }

    /// Iterations run so far.
    pub fn iterations(&self) -> usize {
        self.iters
    }

    /// Index of the goal node, once attached.
    pub fn reached(&self) -> Option<usize> {
        self.reached
    }

    pub fn is_done(&self) -> bool {
        self.reached.is_some() || self.iters >= self.max_iters
    }

    pub fn path(&self) -> Option<Path> {
        self.reached.map(|idx| Path::new(self.tree.backtrace(idx)))
    }

    /// Drives the search to its end and takes the tree out.
    pub fn finish(mut self) -> RRTResult {
        while self.next().is_some() {}
        let result = self.path();
        RRTResult {
            tree: self.tree,
            iterations: self.iters,
            result,
        }
    }

    /// Like `finish`, but without running any further iterations.
    pub fn stop(self) -> RRTResult {
        let result = self.path();
        RRTResult {
            tree: self.tree,
            iterations: self.iters,
            result,
        }
    }
}

impl<'a, S, O, R> Iterator for RRTIter<'a, S, O, R>
where
    S: RRTSolver,
    O: Obstacle,
    R: Rng + ?Sized,
{
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.is_done() {
            return None;
        }
        self.iters += 1;

        let target = self.sampler.sample(&mut *self.rng);
        let idx = match self.solver.extend(&mut self.tree, &target, &self.workspace) {
            Some(idx) => idx,
            None => return Some(Step::Rejected),
        };

        let reached = *self.tree[idx].point();
        if distance(&reached, &self.goal) < self.goal_tolerance
            && self.workspace.segment_is_free(&reached, &self.goal)
        {
            let goal_idx = self.tree.attach(self.goal, idx);
            self.reached = Some(goal_idx);
            Some(Step::Reached(goal_idx))
        } else {
            Some(Step::Extended(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_done() {
            (0, Some(0))
        } else {
            (1, Some(self.max_iters - self.iters))
        }
    }
}
