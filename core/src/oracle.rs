//! Adjacency oracles
//!
//! An oracle decides whether two elements may be paired. It turns a plain
//! list of elements into a [`Graph`] whose vertices are element positions,
//! so equal elements stay distinct vertices.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;

use crate::algorithm::graph::matching::EdmondsMatching;
use crate::algorithm::traits::AlgorithmError;
use crate::config::InvalidGraphPolicy;
use crate::data_structures::graph::Graph;

/// Symmetric compatibility predicate between elements
pub trait AdjacencyOracle<T> {
    /// Whether `a` and `b` may form a pair. Must not depend on argument order.
    fn compatible(&self, a: &T, b: &T) -> bool;
}

impl<T, F> AdjacencyOracle<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn compatible(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Builds the compatibility graph of `elements`.
///
/// Vertex `i` stands for `elements[i]`. Every unordered pair is asked once,
/// so the graph is symmetric and loop-free whatever the oracle answers.
pub fn graph_from_oracle<T, O>(elements: &[T], oracle: &O) -> Result<Graph<usize>, AlgorithmError>
where
    O: AdjacencyOracle<T> + ?Sized,
{
    let mut edges = Vec::new();
    for (i, a) in elements.iter().enumerate() {
        for (j, b) in elements.iter().enumerate().skip(i + 1) {
            if oracle.compatible(a, b) {
                edges.push((i, j));
            }
        }
    }

    Graph::from_edges(0..elements.len(), edges, InvalidGraphPolicy::Reject)
}

/// Counts exchanging in rounds: the smaller count doubles, paid for by the
/// larger one. Two counts are compatible when the exchange never settles,
/// that is when it never reaches two equal counts.
///
/// The exchange preserves the sum `a + b` and, after dividing out
/// `gcd(a, b)`, only settles when the reduced sum is a power of two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndlessExchange;

impl EndlessExchange {
    fn gcd(mut a: u128, mut b: u128) -> u128 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    }
}

impl AdjacencyOracle<u64> for EndlessExchange {
    fn compatible(&self, a: &u64, b: &u64) -> bool {
        if a == b {
            return false;
        }
        // an empty count never doubles, so the other never drains
        if *a == 0 || *b == 0 {
            return true;
        }
        let (a, b) = (u128::from(*a), u128::from(*b));
        let sum = a + b;
        let reduced = sum / Self::gcd(a, b);
        !reduced.is_power_of_two()
    }
}

/// Number of elements left without a partner when as many disjoint
/// compatible pairs as possible are formed.
pub fn unpaired_count<T, O>(elements: &[T], oracle: &O) -> Result<usize, AlgorithmError>
where
    O: AdjacencyOracle<T> + ?Sized,
{
    let graph = graph_from_oracle(elements, oracle)?;
    let matching = EdmondsMatching::new().compute(&graph, None)?;
    let unpaired = elements.len() - 2 * matching.cardinality();
    debug!(
        "{} of {} elements paired, {} left over",
        2 * matching.cardinality(),
        elements.len(),
        unpaired
    );
    Ok(unpaired)
}
