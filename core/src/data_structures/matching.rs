//! Dense matching representation
//!
//! A matching is stored as a mate array: `mate[v]` is the partner of `v` or
//! `None`. Pairing always writes both directions, so the relation stays
//! symmetric; re-pairing a vertex overwrites its old entry, and callers that
//! flip alternating paths rely on that.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::algorithm::traits::{AlgorithmError, NodeId};
use crate::config::InvalidGraphPolicy;
use crate::data_structures::graph::Graph;

/// Symmetric partial vertex pairing over dense indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    mate: Vec<Option<usize>>,
}

impl Matching {
    /// Empty matching over `node_count` vertices
    pub fn new(node_count: usize) -> Self {
        Self {
            mate: vec![None; node_count],
        }
    }

    /// Empty matching sized for `graph`
    pub fn empty_for<V>(graph: &Graph<V>) -> Self {
        Self::new(graph.node_count())
    }

    /// Builds a matching from identity pairs, e.g. a caller-supplied seed.
    ///
    /// Every entry `a -> b` must name two distinct adjacent vertices and be
    /// mirrored by `b -> a`. Violations are handled per `policy`.
    pub fn from_seed<V>(
        graph: &Graph<V>,
        seed: &HashMap<V, V>,
        policy: InvalidGraphPolicy,
    ) -> Result<Self, AlgorithmError>
    where
        V: Clone + Eq + Hash + Debug,
    {
        let mut matching = Self::empty_for(graph);

        for (a, b) in seed {
            let problem = match (graph.node_id(a), graph.node_id(b)) {
                (None, _) | (_, None) => Some(format!("pair {:?}-{:?} names an unknown vertex", a, b)),
                (Some(u), Some(w)) if u == w => Some(format!("{:?} is paired with itself", a)),
                (Some(u), Some(w)) if !graph.has_edge(u, w) => {
                    Some(format!("{:?} and {:?} are not adjacent", a, b))
                }
                _ if seed.get(b) != Some(a) => {
                    Some(format!("{:?} -> {:?} is not mirrored by {:?} -> {:?}", a, b, b, a))
                }
                (Some(u), Some(w)) => {
                    matching.pair(u.as_usize(), w.as_usize());
                    None
                }
            };

            if let Some(message) = problem {
                match policy {
                    InvalidGraphPolicy::Reject => return Err(AlgorithmError::InvalidSeed(message)),
                    InvalidGraphPolicy::Ignore => debug!("ignoring seed entry: {}", message),
                }
            }
        }

        Ok(matching)
    }

    /// Number of vertices the matching covers
    pub fn node_count(&self) -> usize {
        self.mate.len()
    }

    /// Number of matched pairs
    pub fn cardinality(&self) -> usize {
        self.mate.iter().filter(|m| m.is_some()).count() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.mate.iter().all(Option::is_none)
    }

    pub fn partner(&self, node: NodeId) -> Option<NodeId> {
        self.mate(node.as_usize()).map(NodeId)
    }

    pub fn is_matched(&self, node: NodeId) -> bool {
        self.mate(node.as_usize()).is_some()
    }

    /// Matched pairs, lower identifier first
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.mate
            .iter()
            .enumerate()
            .filter_map(|(v, &m)| m.filter(|&w| v < w).map(|w| (NodeId(v), NodeId(w))))
    }

    /// Unmatched vertices in ascending order
    pub fn unmatched(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.mate
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(v, _)| NodeId(v))
    }

    /// Translates the matching back to identities; both directions of every
    /// pair are present and unmatched vertices are absent.
    pub fn to_map<V>(&self, graph: &Graph<V>) -> HashMap<V, V>
    where
        V: Clone + Eq + Hash + Debug,
    {
        let mut map = HashMap::with_capacity(self.cardinality() * 2);
        for (u, w) in self.pairs() {
            if let (Some(a), Some(b)) = (graph.vertex(u), graph.vertex(w)) {
                map.insert(a.clone(), b.clone());
                map.insert(b.clone(), a.clone());
            }
        }
        map
    }

    pub(crate) fn mate(&self, v: usize) -> Option<usize> {
        self.mate.get(v).copied().flatten()
    }

    /// Pairs `u` with `w`, overwriting both previous entries
    pub(crate) fn pair(&mut self, u: usize, w: usize) {
        self.mate[u] = Some(w);
        self.mate[w] = Some(u);
    }
}
