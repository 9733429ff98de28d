use tracing::trace;

use crate::builder::RRTBuilder;
use crate::obstacle::Obstacle;
use crate::point::*;
use crate::solvers::{steer, RRTSolver, Workspace};
use crate::tree::Tree;

pub const DEFAULT_MAX_RADIUS: f64 = 2.0;
pub const DEFAULT_GAMMA: f64 = 1.0;

/// RRT* with a shrinking neighbourhood, best-parent selection and local rewiring.
///
/// The rewire step only updates the cost of the node that was re-parented. Its descendants keep
/// the cost they were attached with, which is never lower than their real cost through the tree.
/// The search stops at the first node inside the goal tolerance like plain RRT does, so the
/// returned path is cost-improved but not optimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RRTStarSolver {
    expand_dist: f64,
    max_radius: f64,
    gamma: f64,
}

impl RRTStarSolver {
    pub fn new(expand_dist: f64, max_radius: f64, gamma: f64) -> Self {
        RRTStarSolver {
            expand_dist,
            max_radius,
            gamma,
        }
    }

    pub fn expand_dist(&self) -> f64 {
        self.expand_dist
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Neighbourhood radius for a tree of `n` nodes.
    pub fn near_radius(&self, n: usize) -> f64 {
        near_radius(n, self.expand_dist, self.max_radius, self.gamma)
    }

    fn choose_parent<O: Obstacle>(
        &self,
        tree: &Tree,
        candidate: &Point,
        nearest_idx: usize,
        near: &[usize],
        workspace: &Workspace<'_, O>,
    ) -> (usize, f64) {
        let nearest = &tree[nearest_idx];
        let mut best = (
            nearest_idx,
            nearest.cost() + distance(nearest.point(), candidate),
        );

        for &idx in near.iter().filter(|&&idx| idx != nearest_idx) {
            let node = &tree[idx];
            let cost = node.cost() + distance(node.point(), candidate);
            if cost < best.1 && workspace.segment_is_free(node.point(), candidate) {
                best = (idx, cost);
            }
        }

        best
    }

    fn rewire<O: Obstacle>(
        &self,
        tree: &mut Tree,
        new_idx: usize,
        near: &[usize],
        workspace: &Workspace<'_, O>,
    ) {
        let new_point = *tree[new_idx].point();
        let new_cost = tree[new_idx].cost();
        let parent = tree[new_idx].parent();

        for &idx in near.iter().filter(|&&idx| Some(idx) != parent) {
            let neighbor = *tree[idx].point();
            let cost = new_cost + distance(&new_point, &neighbor);
            if cost < tree[idx].cost()
                && workspace.segment_is_free(&new_point, &neighbor)
                && tree.reparent(idx, new_idx, cost)
            {
                trace!(node = idx, parent = new_idx, cost, "rewired");
            }
        }
    }
}

impl Default for RRTStarSolver {
    fn default() -> Self {
        RRTStarSolver::new(1.0, DEFAULT_MAX_RADIUS, DEFAULT_GAMMA)
    }
}

/// `min(max_radius, expand_dist + gamma * (ln(n) / n)^(1/3) * expand_dist)`.
///
/// With only the root in the tree the shrinking term is zero and the radius is `expand_dist`
/// (capped by `max_radius`).
pub fn near_radius(n: usize, expand_dist: f64, max_radius: f64, gamma: f64) -> f64 {
    let shrinking = if n > 1 {
        let n = n as f64;
        (n.ln() / n).cbrt()
    } else {
        0.0
    };
    max_radius.min(expand_dist + gamma * shrinking * expand_dist)
}

impl RRTSolver for RRTStarSolver {
    const NAME: &'static str = "RRT*";

    fn from_builder<O: Obstacle>(builder: &RRTBuilder<Self, O>) -> Self {
        RRTStarSolver::new(
            builder.get_expand_dist(),
            builder.get_max_radius(),
            builder.get_gamma(),
        )
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

        let radius = self.near_radius(tree.len());
        let near = tree.near(&candidate, radius);

        let (parent, cost) = self.choose_parent(tree, &candidate, nearest_idx, &near, workspace);
        let new_idx = tree.insert(candidate, parent, cost);

        self.rewire(tree, new_idx, &near, workspace);

        Some(new_idx)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::obstacle::{BBox, CollisionChecker};

    fn free_workspace() -> Workspace<'static, BBox> {
        Workspace::new(&[], CollisionChecker::default())
    }

    #[test]
    fn radius_with_root_only() {
        assert_relative_eq!(near_radius(1, 1.0, 2.0, 1.0), 1.0);
        assert_relative_eq!(near_radius(1, 1.0, 0.5, 1.0), 0.5);
    }

    #[test]
    fn radius_shrinks_and_is_capped() {
        let r = |n| near_radius(n, 1.0, 10.0, 1.0);
        let expected = 1.0 + (100.0_f64.ln() / 100.0).cbrt();
        assert_relative_eq!(r(100), expected);
        assert!(r(10_000) < r(100));
        assert!(r(10_000) > 1.0);

        assert_relative_eq!(near_radius(3, 1.0, 1.2, 1.0), 1.2);
        assert_relative_eq!(near_radius(100, 1.0, 10.0, 0.0), 1.0);
    }

    #[test]
    fn picks_cheapest_parent() {
        // Node 1 carries an inflated cost, node 2 hangs directly off the root.
        let mut tree = Tree::new(point(0.0, 0.0, 0.0));
        let detour = tree.insert(point(1.0, 1.0, 0.0), 0, 10.0);
        let direct = tree.attach(point(0.0, 1.2, 0.0), 0);

        let target = point(1.0, 2.0, 0.0);
        assert_eq!(tree.nearest(&target), detour);

        let solver = RRTStarSolver::new(1.0, 2.0, 1.0);
        let idx = solver.extend(&mut tree, &target, &free_workspace()).unwrap();

        assert_eq!(*tree[idx].point(), target);
        assert_eq!(tree[idx].parent(), Some(direct));
        let parent = &tree[direct];
        assert_relative_eq!(
            tree[idx].cost(),
            parent.cost() + distance(parent.point(), tree[idx].point())
        );
        // The detour node is cheaper through the new node now.
        assert_eq!(tree[detour].parent(), Some(idx));
        assert_relative_eq!(tree[detour].cost(), tree[idx].cost() + 1.0);
    }

    #[test]
    fn rewires_without_propagating() {
        let mut tree = Tree::new(point(0.0, 0.0, 0.0));
        let cheap = tree.attach(point(1.0, 1.0, 0.0), 0);
        let expensive = tree.insert(point(2.0, 1.0, 0.0), 0, 50.0);
        let child = tree.attach(point(2.0, -1.0, 0.0), expensive);

        let solver = RRTStarSolver::new(1.0, 2.0, 1.0);
        let idx = solver
            .extend(&mut tree, &point(2.0, 5.0, 0.0), &free_workspace())
            .unwrap();

        // Steered from the expensive node, which is the nearest, but attached to the cheap one.
        assert_eq!(*tree[idx].point(), point(2.0, 2.0, 0.0));
        assert_eq!(tree[idx].parent(), Some(cheap));

        assert_eq!(tree[expensive].parent(), Some(idx));
        let new = &tree[idx];
        assert_relative_eq!(
            tree[expensive].cost(),
            new.cost() + distance(new.point(), tree[expensive].point())
        );

        // The child of the rewired node keeps its parent and its stale cost.
        assert_eq!(tree[child].parent(), Some(expensive));
        assert_relative_eq!(tree[child].cost(), 52.0);
        let real = tree[expensive].cost() + 2.0;
        assert!(tree[child].cost() > real);
    }

    #[test]
    fn blocked_candidate_leaves_tree_untouched() {
        let mut tree = Tree::new(point(0.0, 0.0, 0.0));
        let obstacles = [BBox::from_extents(0.5, 2.0, -1.0, 1.0, -1.0, 1.0)];
        let workspace = Workspace::new(&obstacles, CollisionChecker::default());

        let solver = RRTStarSolver::default();
        assert_eq!(solver.extend(&mut tree, &point(3.0, 0.0, 0.0), &workspace), None);
        assert_eq!(tree.len(), 1);
    }
}
