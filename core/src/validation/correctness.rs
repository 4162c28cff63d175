//! Correctness verification for matchings
//!
//! Two checks back the engine's guarantees:
//! - structural validity: the mate relation is symmetric, stays inside the
//!   vertex range and only pairs adjacent vertices;
//! - optimality on small inputs: an exhaustive search computes the true
//!   maximum cardinality to compare against.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use thiserror::Error;

use crate::algorithm::traits::NodeId;
use crate::data_structures::graph::Graph;
use crate::data_structures::matching::Matching;

/// Largest graph [`exhaustive_maximum_cardinality`] accepts
pub const EXHAUSTIVE_VERTEX_LIMIT: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("matching covers {matching} vertices but the graph has {graph}")]
    SizeMismatch { matching: usize, graph: usize },

    #[error("{0} is paired with a vertex outside the graph")]
    OutOfRange(NodeId),

    #[error("{0} -> {1} is not mirrored")]
    Asymmetric(NodeId, NodeId),

    #[error("{0} and {1} are paired without sharing an edge")]
    NotAnEdge(NodeId, NodeId),

    #[error("exhaustive search is limited to {limit} vertices, graph has {actual}")]
    TooLarge { limit: usize, actual: usize },
}

/// Checks that `matching` is a valid matching of `graph`.
pub fn verify_matching<V>(graph: &Graph<V>, matching: &Matching) -> Result<(), VerificationError> {
    let n = graph.node_count();
    if matching.node_count() != n {
        return Err(VerificationError::SizeMismatch {
            matching: matching.node_count(),
            graph: n,
        });
    }

    for v in 0..n {
        let Some(w) = matching.mate(v) else {
            continue;
        };
        if w >= n {
            return Err(VerificationError::OutOfRange(NodeId(v)));
        }
        if matching.mate(w) != Some(v) {
            return Err(VerificationError::Asymmetric(NodeId(v), NodeId(w)));
        }
        if !graph.has_edge(NodeId(v), NodeId(w)) {
            return Err(VerificationError::NotAnEdge(NodeId(v), NodeId(w)));
        }
    }
    Ok(())
}

/// Maximum matching cardinality by exhaustive search.
///
/// Branches on the lowest free vertex: leave it unmatched or pair it with
/// each free neighbor. Exponential; meant for cross-checking small graphs.
pub fn exhaustive_maximum_cardinality<V>(graph: &Graph<V>) -> Result<usize, VerificationError> {
    let n = graph.node_count();
    if n > EXHAUSTIVE_VERTEX_LIMIT {
        return Err(VerificationError::TooLarge {
            limit: EXHAUSTIVE_VERTEX_LIMIT,
            actual: n,
        });
    }

    fn best<V>(graph: &Graph<V>, used: &mut [bool], from: usize) -> usize {
        let Some(v) = (from..used.len()).find(|&v| !used[v]) else {
            return 0;
        };

        used[v] = true;
        let mut result = best(graph, used, v + 1);
        for &w in graph.adjacent(v) {
            if !used[w] {
                used[w] = true;
                result = result.max(1 + best(graph, used, v + 1));
                used[w] = false;
            }
        }
        used[v] = false;
        result
    }

    let mut used = vec![false; n];
    Ok(best(graph, &mut used, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvalidGraphPolicy;

    fn graph(n: u32, edges: &[(u32, u32)]) -> Graph<u32> {
        Graph::from_edges(0..n, edges.iter().copied(), InvalidGraphPolicy::Reject).unwrap()
    }

    #[test]
    fn test_valid_matching_passes() {
        let g = graph(4, &[(0, 1), (2, 3)]);
        let mut matching = Matching::empty_for(&g);
        matching.pair(0, 1);
        assert_eq!(verify_matching(&g, &matching), Ok(()));
    }

    #[test]
    fn test_non_edge_is_reported() {
        let g = graph(4, &[(0, 1), (2, 3)]);
        let mut matching = Matching::empty_for(&g);
        matching.pair(0, 2);
        assert_eq!(
            verify_matching(&g, &matching),
            Err(VerificationError::NotAnEdge(NodeId(0), NodeId(2)))
        );
    }

    #[test]
    fn test_stale_partner_is_asymmetric() {
        let g = graph(3, &[(0, 1), (1, 2)]);
        let mut matching = Matching::empty_for(&g);
        matching.pair(0, 1);
        matching.pair(1, 2);
        assert_eq!(
            verify_matching(&g, &matching),
            Err(VerificationError::Asymmetric(NodeId(0), NodeId(1)))
        );
    }

    #[test]
    fn test_size_mismatch() {
        let g = graph(3, &[]);
        let matching = Matching::new(2);
        assert!(matches!(
            verify_matching(&g, &matching),
            Err(VerificationError::SizeMismatch { matching: 2, graph: 3 })
        ));
    }

    #[test]
    fn test_exhaustive_small_graphs() {
        assert_eq!(exhaustive_maximum_cardinality(&graph(0, &[])), Ok(0));
        assert_eq!(exhaustive_maximum_cardinality(&graph(3, &[(0, 1), (1, 2), (2, 0)])), Ok(1));
        assert_eq!(
            exhaustive_maximum_cardinality(&graph(6, &[(0, 3), (0, 4), (1, 4), (1, 5), (2, 3), (2, 5)])),
            Ok(3)
        );
    }

    #[test]
    fn test_exhaustive_limit() {
        let g = graph(21, &[]);
        assert_eq!(
            exhaustive_maximum_cardinality(&g),
            Err(VerificationError::TooLarge { limit: 20, actual: 21 })
        );
    }
}
