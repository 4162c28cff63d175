//! Undirected simple graph over opaque vertex identities
//!
//! Identities are mapped to dense [`NodeId`]s once, when the graph is
//! loaded; every algorithm afterwards works on integer-indexed arrays.
//! Adjacency lists are sorted and deduplicated, so edge queries are
//! logarithmic in the vertex degree.
//!
//! # Loading Contract
//! The adjacency oracle must describe a simple undirected graph. Defects are
//! handled according to [`InvalidGraphPolicy`]: rejected with a descriptive
//! [`AlgorithmError::InvalidGraph`], or dropped with a debug log line.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::algorithm::traits::{AlgorithmError, NodeId};
use crate::config::InvalidGraphPolicy;

/// Immutable undirected graph with dense vertex indices
#[derive(Debug, Clone)]
pub struct Graph<V> {
    /// Dense index to identity
    vertices: Vec<V>,
    /// Identity to dense index
    index: HashMap<V, usize>,
    /// Sorted neighbor indices per vertex
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl<V> Graph<V>
where
    V: Clone + Eq + Hash + Debug,
{
    /// Loads a graph from a vertex set and a neighbor oracle.
    ///
    /// Repeated vertices and repeated neighbors are collapsed. Self-loops,
    /// neighbors outside the vertex set and arcs without a reverse arc are
    /// defects handled per `policy`.
    pub fn from_adjacency<I, F, N>(
        vertices: I,
        mut neighbors: F,
        policy: InvalidGraphPolicy,
    ) -> Result<Self, AlgorithmError>
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> N,
        N: IntoIterator<Item = V>,
    {
        let mut graph = Self::with_vertices(vertices);

        let mut arcs: Vec<Vec<usize>> = vec![Vec::new(); graph.vertices.len()];
        for (source, vertex) in graph.vertices.iter().enumerate() {
            for target in neighbors(vertex) {
                let Some(&target_index) = graph.index.get(&target) else {
                    graph.defect(
                        policy,
                        format!("neighbor {:?} of {:?} is not a vertex", target, vertex),
                    )?;
                    continue;
                };
                if target_index == source {
                    graph.defect(policy, format!("self-loop at {:?}", target))?;
                    continue;
                }
                arcs[source].push(target_index);
            }
        }
        for list in &mut arcs {
            list.sort_unstable();
            list.dedup();
        }

        for (source, targets) in arcs.iter().enumerate() {
            for &target in targets {
                if arcs[target].binary_search(&source).is_ok() {
                    graph.adjacency[source].push(target);
                } else {
                    graph.defect(
                        policy,
                        format!(
                            "{:?} lists {:?} as a neighbor but not the other way round",
                            graph.vertices[source], graph.vertices[target]
                        ),
                    )?;
                }
            }
        }

        graph.edge_count = graph.adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        debug!(
            "loaded graph with {} vertices and {} edges",
            graph.node_count(),
            graph.edge_count
        );
        Ok(graph)
    }

    /// Loads a graph from an explicit undirected edge list.
    ///
    /// Each edge is recorded in both directions, so only self-loops and
    /// endpoints outside the vertex set can be defects.
    pub fn from_edges<I, E>(
        vertices: I,
        edges: E,
        policy: InvalidGraphPolicy,
    ) -> Result<Self, AlgorithmError>
    where
        I: IntoIterator<Item = V>,
        E: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::with_vertices(vertices);

        for (a, b) in edges {
            let (Some(&u), Some(&w)) = (graph.index.get(&a), graph.index.get(&b)) else {
                graph.defect(
                    policy,
                    format!("edge {:?}-{:?} has an endpoint that is not a vertex", a, b),
                )?;
                continue;
            };
            if u == w {
                graph.defect(policy, format!("self-loop at {:?}", a))?;
                continue;
            }
            graph.adjacency[u].push(w);
            graph.adjacency[w].push(u);
        }
        for list in &mut graph.adjacency {
            list.sort_unstable();
            list.dedup();
        }

        graph.edge_count = graph.adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        Ok(graph)
    }

    fn with_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut graph = Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        };
        for vertex in vertices {
            if !graph.index.contains_key(&vertex) {
                graph.index.insert(vertex.clone(), graph.vertices.len());
                graph.vertices.push(vertex);
                graph.adjacency.push(Vec::new());
            }
        }
        graph
    }

    fn defect(&self, policy: InvalidGraphPolicy, message: String) -> Result<(), AlgorithmError> {
        match policy {
            InvalidGraphPolicy::Reject => Err(AlgorithmError::InvalidGraph(message)),
            InvalidGraphPolicy::Ignore => {
                debug!("ignoring malformed adjacency: {}", message);
                Ok(())
            }
        }
    }

    /// Dense identifier of `vertex`, if it belongs to the graph
    pub fn node_id(&self, vertex: &V) -> Option<NodeId> {
        self.index.get(vertex).copied().map(NodeId)
    }

    /// Identity behind a dense identifier
    pub fn vertex(&self, node: NodeId) -> Option<&V> {
        self.vertices.get(node.as_usize())
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }
}

impl<V> Graph<V> {
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Neighbors of `node` in ascending identifier order
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(node.as_usize())
            .into_iter()
            .flatten()
            .map(|&w| NodeId(w))
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(node.as_usize()).map_or(0, Vec::len)
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacent(a.as_usize()).binary_search(&b.as_usize()).is_ok()
    }

    /// Every undirected edge once, lower identifier first
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, list)| {
            list.iter()
                .filter(move |&&w| u < w)
                .map(move |&w| (NodeId(u), NodeId(w)))
        })
    }

    /// Raw neighbor indices; empty for out-of-range indices
    pub(crate) fn adjacent(&self, v: usize) -> &[usize] {
        self.adjacency.get(v).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn adjacency(pairs: &[(char, &[char])]) -> HashMap<char, Vec<char>> {
        pairs.iter().map(|(v, ns)| (*v, ns.to_vec())).collect()
    }

    #[test]
    fn test_load_symmetric_adjacency() {
        let adj = adjacency(&[('a', &['b', 'c']), ('b', &['a']), ('c', &['a', 'a'])]);
        let graph = Graph::from_adjacency(
            ['a', 'b', 'c'],
            |v| adj[v].clone(),
            InvalidGraphPolicy::Reject,
        )
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let a = graph.node_id(&'a').unwrap();
        let b = graph.node_id(&'b').unwrap();
        let c = graph.node_id(&'c').unwrap();
        assert!(graph.has_edge(a, b));
        assert!(graph.has_edge(c, a));
        assert!(!graph.has_edge(b, c));
        assert_eq!(graph.degree(a), 2);
        assert_eq!(graph.vertex(b), Some(&'b'));
        assert_eq!(graph.edges().count(), 2);
    }

    #[test]
    fn test_reject_self_loop() {
        let err = Graph::from_adjacency([1, 2], |&v| vec![v], InvalidGraphPolicy::Reject).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidGraph(ref msg) if msg.contains("self-loop")));
    }

    #[test]
    fn test_reject_asymmetric_arc() {
        let err = Graph::from_adjacency(
            [1, 2],
            |&v| if v == 1 { vec![2] } else { vec![] },
            InvalidGraphPolicy::Reject,
        )
        .unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidGraph(ref msg) if msg.contains("other way round")));
    }

    #[test]
    fn test_reject_unknown_neighbor() {
        let err = Graph::from_adjacency([1, 2], |_| vec![7], InvalidGraphPolicy::Reject).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidGraph(ref msg) if msg.contains("7")));
    }

    #[test]
    fn test_defect_names_listing_vertex() {
        let adj = adjacency(&[('a', &['b']), ('b', &['a']), ('c', &['z'])]);
        let err = Graph::from_adjacency(['a', 'b', 'c'], |v| adj[v].clone(), InvalidGraphPolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidGraph(ref msg) if msg == "neighbor 'z' of 'c' is not a vertex"));

        let graph = Graph::from_adjacency(['a', 'b', 'c'], |v| adj[v].clone(), InvalidGraphPolicy::Ignore).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(graph.node_id(&'c').unwrap()), 0);
    }

    #[test]
    fn test_ignore_drops_defects() {
        let graph = Graph::from_adjacency(
            [1, 2, 3],
            |&v| match v {
                1 => vec![1, 2, 3, 9],
                2 => vec![1],
                _ => vec![],
            },
            InvalidGraphPolicy::Ignore,
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 1);
        let one = graph.node_id(&1).unwrap();
        let three = graph.node_id(&3).unwrap();
        assert!(!graph.has_edge(one, three));
        assert!(!graph.has_edge(one, one));
    }

    #[test]
    fn test_from_edges_deduplicates() {
        let graph = Graph::from_edges(
            ["x", "y", "z", "x"],
            [("x", "y"), ("y", "x"), ("y", "z")],
            InvalidGraphPolicy::Reject,
        )
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let y = graph.node_id(&"y").unwrap();
        assert_eq!(graph.neighbors(y).count(), 2);
    }

    #[test]
    fn test_from_edges_policies() {
        assert!(Graph::from_edges([1, 2], [(1, 1)], InvalidGraphPolicy::Reject).is_err());
        assert!(Graph::from_edges([1, 2], [(1, 5)], InvalidGraphPolicy::Reject).is_err());

        let graph = Graph::from_edges([1, 2], [(1, 1), (1, 5), (1, 2)], InvalidGraphPolicy::Ignore).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_out_of_range_queries() {
        let graph = Graph::from_edges([1], Vec::<(i32, i32)>::new(), InvalidGraphPolicy::Reject).unwrap();
        assert_eq!(graph.neighbors(NodeId(4)).count(), 0);
        assert_eq!(graph.degree(NodeId(4)), 0);
        assert!(graph.vertex(NodeId(4)).is_none());
        assert!(graph.adjacent(9).is_empty());
    }
}
