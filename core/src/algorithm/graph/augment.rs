//! Single augmenting-path search with blossom contraction
//!
//! One search grows a forest of alternating trees from every unmatched
//! vertex in breadth-first order, so shorter augmenting paths are found
//! first. Even-level (S) nodes are blossoms named by their union-find
//! leader; odd-level (T) nodes are single vertices. An edge between two S
//! blossoms either closes an odd cycle inside one tree, which is contracted
//! into a new blossom, or joins two different trees, which yields an
//! augmenting path.
//!
//! # Structure Tree
//! The tree is a node pool of [`TreeNode`] variants with stable ids. Leaders
//! change as blossoms merge, so lookups go through the union-find first and
//! then through the leader-to-node table; the nodes themselves never move.
//!
//! # Path Reconstruction
//! A T vertex absorbed into a blossom remembers the base pair `(v, w)` of the
//! edge that closed the blossom. Reaching such a vertex while walking to the
//! root means detouring through `v` back to the vertex, then continuing from
//! `w`. Detours nest, and are unwound with an explicit frame stack.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;

use log::{debug, trace};

use crate::algorithm::traits::AlgorithmError;
use crate::data_structures::disjoint_set::DisjointSet;
use crate::data_structures::graph::Graph;
use crate::data_structures::matching::Matching;

/// Node of the per-search structure tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeNode {
    /// Even-level blossom; a fresh blossom holds the single vertex `top`
    Blossom {
        top: usize,
        /// T vertex above the blossom, `None` for a tree root
        parent: Option<usize>,
        level: usize,
    },
    /// Odd-level vertex reached over a non-matching edge
    Vertex {
        vertex: usize,
        /// S vertex on the other end of that edge
        predecessor: usize,
        /// Set once the vertex is absorbed into a blossom
        base: Option<(usize, usize)>,
        level: usize,
    },
}

impl TreeNode {
    pub fn level(&self) -> usize {
        match *self {
            TreeNode::Blossom { level, .. } | TreeNode::Vertex { level, .. } => level,
        }
    }
}

/// Alternating forest of one search
#[derive(Debug, Clone)]
pub struct StructureTree {
    nodes: Vec<TreeNode>,
    /// leader -> blossom node; stale entries for former leaders are harmless
    even: Vec<Option<usize>>,
    /// vertex -> T node
    odd: Vec<Option<usize>>,
}

impl StructureTree {
    pub fn new(node_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            even: vec![None; node_count],
            odd: vec![None; node_count],
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    fn push(&mut self, node: TreeNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn add_blossom(&mut self, top: usize, parent: Option<usize>, level: usize) {
        let id = self.push(TreeNode::Blossom { top, parent, level });
        self.even[top] = Some(id);
    }

    fn add_vertex(&mut self, vertex: usize, predecessor: usize, level: usize) {
        let id = self.push(TreeNode::Vertex {
            vertex,
            predecessor,
            base: None,
            level,
        });
        self.odd[vertex] = Some(id);
    }

    /// Whether `leader` names an S blossom
    pub fn is_even(&self, leader: usize) -> bool {
        self.even.get(leader).copied().flatten().is_some()
    }

    /// Whether `vertex` was ever reached at an odd level
    pub fn is_odd(&self, vertex: usize) -> bool {
        self.odd.get(vertex).copied().flatten().is_some()
    }

    fn blossom(&self, leader: usize) -> Result<(usize, Option<usize>, usize), AlgorithmError> {
        match self.even.get(leader).copied().flatten().map(|id| self.nodes[id]) {
            Some(TreeNode::Blossom { top, parent, level }) => Ok((top, parent, level)),
            _ => Err(AlgorithmError::InvariantViolation(format!(
                "leader {} does not name an S blossom",
                leader
            ))),
        }
    }

    /// T vertex above the blossom led by `leader`, `None` at a root
    fn parent_of(&self, leader: usize) -> Result<Option<usize>, AlgorithmError> {
        self.blossom(leader).map(|(_, parent, _)| parent)
    }

    fn level_of(&self, leader: usize) -> Result<usize, AlgorithmError> {
        self.blossom(leader).map(|(_, _, level)| level)
    }

    fn vertex_node(&mut self, vertex: usize) -> Result<&mut TreeNode, AlgorithmError> {
        match self.odd.get(vertex).copied().flatten() {
            Some(id) => Ok(&mut self.nodes[id]),
            None => Err(AlgorithmError::InvariantViolation(format!(
                "vertex {} is not a T vertex",
                vertex
            ))),
        }
    }

    fn predecessor(&self, vertex: usize) -> Result<usize, AlgorithmError> {
        match self.odd.get(vertex).copied().flatten().map(|id| self.nodes[id]) {
            Some(TreeNode::Vertex { predecessor, .. }) => Ok(predecessor),
            _ => Err(AlgorithmError::InvariantViolation(format!(
                "vertex {} has no matched predecessor",
                vertex
            ))),
        }
    }

    /// Base pair of an absorbed T vertex
    pub fn base_of(&self, vertex: usize) -> Option<(usize, usize)> {
        match self.odd.get(vertex).copied().flatten().map(|id| self.nodes[id]) {
            Some(TreeNode::Vertex { base, .. }) => base,
            _ => None,
        }
    }

    fn set_base(&mut self, vertex: usize, pair: (usize, usize)) -> Result<(), AlgorithmError> {
        if let TreeNode::Vertex { base, .. } = self.vertex_node(vertex)? {
            *base = Some(pair);
        }
        Ok(())
    }

    /// Points `new_leader` at the blossom node of `old_leader`
    fn rename(&mut self, old_leader: usize, new_leader: usize) {
        let node = self.even[old_leader];
        self.even[new_leader] = node;
    }
}

/// Summary of one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Whether the matching grew by one pair
    pub augmented: bool,
    pub blossoms_contracted: usize,
    pub vertices_explored: usize,
    /// Vertices on the augmenting path, 0 when none was found
    pub path_length: usize,
}

/// Frame of the alternating-path walk; `goal` is the T vertex that ends a
/// detour, `None` for the outermost walk to the root
struct PathFrame {
    path: Vec<usize>,
    goal: Option<usize>,
    cursor: usize,
}

/// State of one augmenting-path search
#[derive(Debug)]
pub struct AugmentingSearch<'g, V> {
    graph: &'g Graph<V>,
    leader: DisjointSet,
    tree: StructureTree,
    /// S vertices in discovery order; `cursor` marks the FIFO head
    queue: Vec<usize>,
    cursor: usize,
    outcome: SearchOutcome,
}

impl<'g, V> AugmentingSearch<'g, V> {
    pub fn new(graph: &'g Graph<V>) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            leader: DisjointSet::new(n),
            tree: StructureTree::new(n),
            queue: Vec::with_capacity(n),
            cursor: 0,
            outcome: SearchOutcome::default(),
        }
    }

    /// Searches for one augmenting path and applies it to `matching`.
    pub fn run(mut self, matching: &mut Matching) -> Result<SearchOutcome, AlgorithmError> {
        let graph = self.graph;
        if matching.node_count() != graph.node_count() {
            return Err(AlgorithmError::InvalidSeed(format!(
                "matching covers {} vertices, graph has {}",
                matching.node_count(),
                graph.node_count()
            )));
        }

        for v in 0..graph.node_count() {
            if matching.mate(v).is_none() {
                self.tree.add_blossom(v, None, 0);
                self.queue.push(v);
            }
        }

        while self.cursor < self.queue.len() {
            let v = self.queue[self.cursor];
            self.cursor += 1;
            self.outcome.vertices_explored += 1;

            for &w in graph.adjacent(v) {
                let w_leader = self.leader.find(w);
                if self.tree.is_even(w_leader) {
                    if self.even_edge(v, w, matching)? {
                        self.outcome.augmented = true;
                        return Ok(self.outcome);
                    }
                } else if !self.tree.is_odd(w) {
                    self.grow(v, w, matching)?;
                }
            }
        }

        debug!(
            "search exhausted after {} vertices and {} contractions",
            self.outcome.vertices_explored, self.outcome.blossoms_contracted
        );
        Ok(self.outcome)
    }

    /// Adds `w` as a T vertex under `v` and its partner as a new S blossom
    fn grow(&mut self, v: usize, w: usize, matching: &Matching) -> Result<(), AlgorithmError> {
        // unmatched vertices are roots, so an unreached w is always matched
        let u = matching.mate(w).ok_or_else(|| {
            AlgorithmError::InvariantViolation(format!("unreached vertex {} is unmatched", w))
        })?;

        let v_leader = self.leader.find(v);
        let level = self.tree.level_of(v_leader)? + 1;
        self.tree.add_vertex(w, v, level);

        let u_leader = self.leader.find(u);
        if !self.tree.is_even(u_leader) {
            self.tree.add_blossom(u, Some(w), level + 1);
            self.queue.push(u);
            trace!("tree grows {} -> {} => {} at level {}", v, w, u, level + 1);
        }
        Ok(())
    }

    /// Handles an edge between two S blossoms; true iff the matching grew.
    fn even_edge(&mut self, v: usize, w: usize, matching: &mut Matching) -> Result<bool, AlgorithmError> {
        if self.leader.find(v) == self.leader.find(w) {
            return Ok(false);
        }

        // walk both branches upward in lock-step until they share a blossom
        // or both stop at their roots
        let mut seen_v = HashSet::new();
        let mut seen_w = HashSet::new();
        let (mut head_v, mut head_w) = (v, w);
        loop {
            head_v = self.climb(head_v, &mut seen_v)?;
            head_w = self.climb(head_w, &mut seen_w)?;

            if head_v == head_w {
                self.contract(v, w, head_v)?;
                return Ok(false);
            }

            if self.tree.parent_of(head_v)?.is_none() && self.tree.parent_of(head_w)?.is_none() {
                self.augment_between(v, w, matching)?;
                return Ok(true);
            }

            if seen_w.contains(&head_v) {
                self.contract(v, w, head_v)?;
                return Ok(false);
            }

            if seen_v.contains(&head_w) {
                self.contract(v, w, head_w)?;
                return Ok(false);
            }
        }
    }

    /// One step up the structure tree from the blossom containing `head`.
    /// Roots stay put; every blossom left behind is recorded in `seen`.
    fn climb(&mut self, head: usize, seen: &mut HashSet<usize>) -> Result<usize, AlgorithmError> {
        let head = self.leader.find(head);
        match self.tree.parent_of(head)? {
            None => Ok(head),
            Some(t) => {
                seen.insert(head);
                let predecessor = self.tree.predecessor(t)?;
                Ok(self.leader.find(predecessor))
            }
        }
    }

    /// Contracts the odd cycle closed by edge `v`-`w` below `ancestor`.
    fn contract(&mut self, v: usize, w: usize, ancestor: usize) -> Result<(), AlgorithmError> {
        let ancestor = self.leader.find(ancestor);
        let side_v = self.collect_side(v, w, ancestor)?;
        let side_w = self.collect_side(w, v, ancestor)?;

        self.leader.union(&side_v);
        self.leader.union(&side_w);
        let leader = self.leader.find(ancestor);
        self.tree.rename(ancestor, leader);

        self.outcome.blossoms_contracted += 1;
        trace!(
            "contracted blossom on edge {}-{} under {} ({} members)",
            v,
            w,
            leader,
            self.leader.weight(leader)
        );
        Ok(())
    }

    /// Leaders and T vertices on the branch from `v` up to `ancestor`. Every
    /// T vertex passed gets base `(v, w)` and rejoins the queue as an S vertex.
    fn collect_side(&mut self, v: usize, w: usize, ancestor: usize) -> Result<Vec<usize>, AlgorithmError> {
        let mut head = self.leader.find(v);
        let mut members = vec![head];
        while head != ancestor {
            let t = self.tree.parent_of(head)?.ok_or_else(|| {
                AlgorithmError::InvariantViolation(format!(
                    "blossom {} reached a root before ancestor {}",
                    head, ancestor
                ))
            })?;
            members.push(t);
            self.tree.set_base(t, (v, w))?;
            self.queue.push(t);
            head = self.leader.find(self.tree.predecessor(t)?);
            members.push(head);
        }
        Ok(members)
    }

    /// Flips the alternating paths from `v` and `w` to their roots and
    /// matches `v` with `w`.
    fn augment_between(&mut self, v: usize, w: usize, matching: &mut Matching) -> Result<(), AlgorithmError> {
        let from_v = self.rematch_to_root(v, matching)?;
        let from_w = self.rematch_to_root(w, matching)?;
        matching.pair(v, w);

        self.outcome.path_length = from_v + from_w;
        debug!(
            "augmented along a path of {} vertices through edge {}-{}",
            self.outcome.path_length, v, w
        );
        Ok(())
    }

    /// Re-pairs the vertices between `start` and its root so that `start`
    /// is left free; returns the number of vertices on that path.
    fn rematch_to_root(&self, start: usize, matching: &mut Matching) -> Result<usize, AlgorithmError> {
        let mut path = self.alternating_path(start, matching)?;
        path.reverse();
        for pair in path.chunks_exact(2) {
            matching.pair(pair[0], pair[1]);
        }
        Ok(path.len())
    }

    /// Vertices on the alternating path from S vertex `start` to its root.
    ///
    /// The path leaves every S vertex over its matching edge and every T
    /// vertex over the edge to its predecessor. An absorbed T vertex `t` with
    /// base `(x, y)` is bypassed: the path from `x` up to `t` is spliced in
    /// reversed, and the walk resumes at `y`.
    pub fn alternating_path(&self, start: usize, matching: &Matching) -> Result<Vec<usize>, AlgorithmError> {
        let mut stack = vec![PathFrame {
            path: Vec::new(),
            goal: None,
            cursor: start,
        }];

        loop {
            let frame = stack.last_mut().ok_or_else(|| {
                AlgorithmError::InvariantViolation("alternating path stack underflow".to_string())
            })?;
            let at = frame.cursor;

            if let Some((x, y)) = self.tree.base_of(at) {
                frame.cursor = y;
                stack.push(PathFrame {
                    path: Vec::new(),
                    goal: Some(at),
                    cursor: x,
                });
                continue;
            }

            frame.path.push(at);
            let finished = match matching.mate(at) {
                None => true,
                Some(t) => {
                    frame.path.push(t);
                    if frame.goal == Some(t) {
                        true
                    } else {
                        frame.cursor = self.tree.predecessor(t)?;
                        false
                    }
                }
            };

            if finished {
                let done = stack.pop().map(|frame| frame.path).unwrap_or_default();
                match stack.last_mut() {
                    Some(outer) => outer.path.extend(done.into_iter().rev()),
                    None => return Ok(done),
                }
            }
        }
    }
}

/// Looks for one augmenting path; true iff `matching` grew by one pair.
pub fn augment<V>(graph: &Graph<V>, matching: &mut Matching) -> Result<bool, AlgorithmError> {
    AugmentingSearch::new(graph)
        .run(matching)
        .map(|outcome| outcome.augmented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvalidGraphPolicy;
    use crate::validation::correctness::verify_matching;

    fn graph(n: u32, edges: &[(u32, u32)]) -> Graph<u32> {
        Graph::from_edges(0..n, edges.iter().copied(), InvalidGraphPolicy::Reject).unwrap()
    }

    fn saturate(g: &Graph<u32>, matching: &mut Matching) -> usize {
        let mut searches = 0;
        while augment(g, matching).unwrap() {
            searches += 1;
            verify_matching(g, matching).unwrap();
        }
        searches
    }

    #[test]
    fn test_single_edge() {
        let g = graph(2, &[(0, 1)]);
        let mut matching = Matching::empty_for(&g);
        assert!(augment(&g, &mut matching).unwrap());
        assert_eq!(matching.mate(0), Some(1));
        assert!(!augment(&g, &mut matching).unwrap());
    }

    #[test]
    fn test_rewires_bad_path_matching() {
        // 0-1-2-3 with the middle edge matched: the only augmenting path
        // is the whole path
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut matching = Matching::empty_for(&g);
        matching.pair(1, 2);

        let outcome = AugmentingSearch::new(&g).run(&mut matching).unwrap();
        assert!(outcome.augmented);
        assert_eq!(outcome.path_length, 4);
        assert_eq!(matching.mate(0), Some(1));
        assert_eq!(matching.mate(2), Some(3));
    }

    #[test]
    fn test_odd_cycle_needs_blossom() {
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let mut matching = Matching::empty_for(&g);
        assert_eq!(saturate(&g, &mut matching), 2);
        assert_eq!(matching.cardinality(), 2);
    }

    #[test]
    fn test_augmenting_path_through_blossom() {
        // triangle 0-1-2 rooted at free vertex 0 with 1-2 matched; the tail
        // 1-3=4-5 ends at free vertex 5 and is only reachable once the
        // triangle is contracted and 1 turns even
        let g = graph(6, &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 4), (4, 5)]);
        let mut matching = Matching::empty_for(&g);
        matching.pair(1, 2);
        matching.pair(3, 4);

        let outcome = AugmentingSearch::new(&g).run(&mut matching).unwrap();
        assert!(outcome.augmented);
        assert_eq!(outcome.blossoms_contracted, 1);
        assert_eq!(outcome.path_length, 6);
        assert_eq!(matching.mate(0), Some(2));
        assert_eq!(matching.mate(1), Some(3));
        assert_eq!(matching.mate(4), Some(5));
        verify_matching(&g, &matching).unwrap();
    }

    #[test]
    fn test_nested_blossoms() {
        // two triangles sharing the stem, resolved through nested detours
        let g = graph(
            10,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 1),
                (3, 4),
                (4, 5),
                (5, 6),
                (6, 4),
                (6, 7),
                (2, 8),
                (8, 9),
                (5, 9),
            ],
        );
        let mut matching = Matching::empty_for(&g);
        saturate(&g, &mut matching);
        assert_eq!(matching.cardinality(), 5);
    }

    #[test]
    fn test_failure_leaves_matching_untouched() {
        let g = graph(3, &[(0, 1), (1, 2)]);
        let mut matching = Matching::empty_for(&g);
        matching.pair(0, 1);
        let before = matching.clone();

        let outcome = AugmentingSearch::new(&g).run(&mut matching).unwrap();
        assert!(!outcome.augmented);
        assert_eq!(outcome.path_length, 0);
        assert_eq!(matching, before);
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let g = graph(3, &[(0, 1)]);
        let mut matching = Matching::new(5);
        assert!(matches!(
            augment(&g, &mut matching),
            Err(AlgorithmError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_tree_levels() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut matching = Matching::empty_for(&g);
        matching.pair(0, 1);
        matching.pair(2, 3);
        // everything matched: no roots, nothing explored
        let outcome = AugmentingSearch::new(&g).run(&mut matching).unwrap();
        assert_eq!(outcome.vertices_explored, 0);

        let mut tree = StructureTree::new(3);
        tree.add_blossom(0, None, 0);
        tree.add_vertex(1, 0, 1);
        tree.add_blossom(2, Some(1), 2);
        assert!(tree.is_even(0));
        assert!(tree.is_odd(1));
        assert_eq!(tree.nodes().iter().map(TreeNode::level).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tree.parent_of(2).unwrap(), Some(1));
        assert_eq!(tree.predecessor(1).unwrap(), 0);
        assert!(tree.parent_of(1).is_err());
        assert_eq!(tree.base_of(1), None);
        tree.set_base(1, (2, 0)).unwrap();
        assert_eq!(tree.base_of(1), Some((2, 0)));
    }
}
