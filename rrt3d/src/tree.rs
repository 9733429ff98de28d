use std::ops::Index;

use crate::point::*;
use crate::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    p: Point,
    cost: f64,
    parent: Option<usize>,
}

impl Node {
    fn new_root(p: Point) -> Self {
        Node {
            p,
            cost: 0.0,
            parent: None,
        }
    }

    #[inline(always)]
    pub fn point(&self) -> &Point {
        &self.p
    }

    /// Cost from the root along parent links, as recorded when the node was last attached.
    #[inline(always)]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline(always)]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Append-only arena of nodes linked to their parents by index.
///
/// Node 0 is the root and the only node without a parent. Insertion only accepts an existing
/// node as parent, so a freshly inserted node always points to an earlier index. `reparent`
/// may later point a node at a newer one, but never under one of its own descendants, so the
/// parent links always form a single tree.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT_IDX: usize = 0;

    pub fn new(root: Point) -> Tree {
        Tree::with_capacity(root, 1)
    }

    pub fn with_capacity(root: Point, capacity: usize) -> Tree {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new_root(root));
        Tree { nodes }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, a tree has at least its root.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT_IDX]
    }

    pub fn get(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + ExactSizeIterator {
        self.nodes.iter()
    }

    pub fn insert(&mut self, p: Point, parent: usize, cost: f64) -> usize {
        assert!(
            parent < self.len(),
            "parent {} is not in the tree (len {})",
            parent,
            self.len()
        );
        self.nodes.push(Node {
            p,
            cost,
            parent: Some(parent),
        });
        self.len() - 1
    }

    /// Inserts `p` under `parent` with cost `cost(parent) + distance(parent, p)`.
    pub fn attach(&mut self, p: Point, parent: usize) -> usize {
        let parent_node = &self[parent];
        let cost = parent_node.cost + distance(&parent_node.p, &p);
        self.insert(p, parent, cost)
    }

    /// Index of the node closest to `p`. Ties go to the earliest inserted node.
    pub fn nearest(&self, p: &Point) -> usize {
        self.nodes
            .iter()
            .enumerate()
            .min_by_key(|(_, node)| distance_squared(&node.p, p).to_ord())
            .map(|(idx, _)| idx)
            .unwrap_or(Self::ROOT_IDX)
    }

    /// Indices of every node strictly closer than `radius` to `p`, in insertion order.
    pub fn near(&self, p: &Point, radius: f64) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| distance(&node.p, p) < radius)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Iterates over `idx` and its ancestors up to the root.
    pub fn ancestors(&self, idx: usize) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(idx),
        }
    }

    pub fn is_ancestor(&self, ancestor: usize, idx: usize) -> bool {
        self.ancestors(idx).any(|i| i == ancestor)
    }

    /// Moves `idx` under `new_parent` and overwrites its cost. Costs of the descendants of `idx`
    /// are left as they are.
    ///
    /// Refuses (returning false) to move the root or to create a cycle.
    pub fn reparent(&mut self, idx: usize, new_parent: usize, cost: f64) -> bool {
        assert!(idx < self.len() && new_parent < self.len());
        if idx == Self::ROOT_IDX || self.is_ancestor(idx, new_parent) {
            return false;
        }
        let node = &mut self.nodes[idx];
        node.parent = Some(new_parent);
        node.cost = cost;
        true
    }

    /// Points from the root down to `idx`.
    pub fn backtrace(&self, idx: usize) -> Vec<Point> {
        let mut waypoints: Vec<Point> = self.ancestors(idx).map(|i| self.nodes[i].p).collect();
        waypoints.reverse();
        waypoints
    }

    /// Number of edges between `idx` and the root.
    pub fn depth(&self, idx: usize) -> usize {
        self.ancestors(idx).count() - 1
    }

    /// Every `(parent, child)` edge of the tree.
    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        self.nodes
            .iter()
            .filter_map(move |node| node.parent.map(|parent| (&self.nodes[parent].p, &node.p)))
    }
}

impl Index<usize> for Tree {
    type Output = Node;

    #[inline(always)]
    fn index(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }
}

pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let curr = self.next?;
        self.next = self.tree.nodes[curr].parent;
        Some(curr)
    }
}
