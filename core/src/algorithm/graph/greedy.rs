//! Near-linear greedy pre-matching
//!
//! The exact blossom search runs once per missing pair, so seeding it with
//! a large matching saves most of its work. The heuristic repeatedly:
//! - matches a vertex with exactly one available neighbor (always safe);
//! - otherwise contracts a vertex with exactly two available neighbors,
//!   merging those neighbors into one cluster and remembering the two
//!   removed edges;
//! - otherwise matches an arbitrary available edge.
//!
//! The edges removed by contractions form a forest over the vertices still
//! unmatched at the end; a final degree-one pass over that forest picks up
//! the pairs it still offers.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace};

use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId, AlgorithmParameter,
    MatchingAlgorithm,
};
use crate::data_structures::graph::Graph;
use crate::data_structures::matching::Matching;

/// Original vertex pair standing behind a cluster-to-cluster edge
type Witness = (usize, usize);

/// Subgraph of still-available clusters, keyed by representative vertex
#[derive(Debug)]
struct AvailableSubgraph {
    /// rep -> neighbor rep -> original edge realising the adjacency
    edges: Vec<BTreeMap<usize, Witness>>,
    /// reps with at least one available neighbor
    alive: BTreeSet<usize>,
    degree_one: BTreeSet<usize>,
    degree_two: BTreeSet<usize>,
    /// edges removed by degree-two contractions
    contracted: Vec<Witness>,
}

impl AvailableSubgraph {
    fn new(node_count: usize) -> Self {
        Self {
            edges: vec![BTreeMap::new(); node_count],
            alive: BTreeSet::new(),
            degree_one: BTreeSet::new(),
            degree_two: BTreeSet::new(),
            contracted: Vec::new(),
        }
    }

    /// Available subgraph of `graph` induced by the vertices `matching`
    /// leaves free
    fn unmatched<V>(graph: &Graph<V>, matching: &Matching) -> Self {
        let mut subgraph = Self::new(graph.node_count());
        for v in 0..graph.node_count() {
            if matching.mate(v).is_some() {
                continue;
            }
            for &w in graph.adjacent(v) {
                if matching.mate(w).is_none() {
                    subgraph.edges[v].insert(w, (v, w));
                }
            }
        }
        subgraph.classify_all();
        subgraph
    }

    /// Available subgraph made of the given edges only
    fn from_witnesses(node_count: usize, witnesses: &[Witness]) -> Self {
        let mut subgraph = Self::new(node_count);
        for &(u, w) in witnesses {
            subgraph.edges[u].insert(w, (u, w));
            subgraph.edges[w].insert(u, (u, w));
        }
        subgraph.classify_all();
        subgraph
    }

    fn classify_all(&mut self) {
        for v in 0..self.edges.len() {
            if !self.edges[v].is_empty() {
                self.alive.insert(v);
            }
            self.update_degree(v);
        }
    }

    /// Re-buckets `v` after its available degree changed
    fn update_degree(&mut self, v: usize) {
        self.degree_one.remove(&v);
        self.degree_two.remove(&v);
        match self.edges[v].len() {
            0 => {
                self.alive.remove(&v);
            }
            1 => {
                self.degree_one.insert(v);
            }
            2 => {
                self.degree_two.insert(v);
            }
            _ => {}
        }
    }

    fn first_neighbor(&self, v: usize) -> Option<usize> {
        self.edges[v].keys().next().copied()
    }

    /// Matches the clusters `v` and `w` through their witness edge and
    /// removes both from the subgraph.
    fn match_clusters(&mut self, v: usize, w: usize, matching: &mut Matching) -> bool {
        let Some(&(p, q)) = self.edges[v].get(&w) else {
            return false;
        };

        let paired = matching.mate(p).is_none() && matching.mate(q).is_none();
        if paired {
            matching.pair(p, q);
        } else {
            trace!("greedy witness {}-{} already covered, dropping clusters", p, q);
        }

        for (cluster, other) in [(v, w), (w, v)] {
            let neighbors: Vec<usize> = self.edges[cluster].keys().copied().collect();
            for x in neighbors {
                if x != other {
                    self.edges[x].remove(&cluster);
                    self.update_degree(x);
                }
            }
        }
        self.edges[v].clear();
        self.edges[w].clear();
        self.update_degree(v);
        self.update_degree(w);

        paired
    }

    /// Contracts the degree-two cluster `v`: its neighbors merge, the smaller
    /// into the larger, and the two removed edges are remembered.
    fn contract(&mut self, v: usize) {
        let mut around = self.edges[v].iter().map(|(&x, &witness)| (x, witness));
        let (Some((mut u, witness_u)), Some((mut w, witness_w))) = (around.next(), around.next())
        else {
            self.update_degree(v);
            return;
        };

        self.contracted.push(witness_u);
        self.contracted.push(witness_w);
        self.edges[u].remove(&v);
        self.edges[w].remove(&v);

        if self.edges[u].len() > self.edges[w].len() {
            std::mem::swap(&mut u, &mut w);
        }

        let absorbed: Vec<(usize, Witness)> =
            self.edges[u].iter().map(|(&x, &witness)| (x, witness)).collect();
        for (x, witness) in absorbed {
            self.edges[x].remove(&u);
            if self.edges[x].contains_key(&w) {
                self.update_degree(x);
            } else if x != w {
                self.edges[x].insert(w, witness);
                self.edges[w].insert(x, witness);
            }
        }
        trace!("contracted degree-two cluster {} merging {} into {}", v, u, w);

        self.edges[u].clear();
        self.edges[v].clear();
        self.update_degree(u);
        self.update_degree(v);
        self.update_degree(w);
    }
}

/// Greedy matching heuristic with degree-one and degree-two reductions
#[derive(Debug, Clone, Default)]
pub struct GreedyMatcher {
    pairs_added: usize,
    contractions: usize,
}

impl GreedyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs added by the last run
    pub fn pairs_added(&self) -> usize {
        self.pairs_added
    }

    /// Degree-two contractions performed by the last run
    pub fn contractions(&self) -> usize {
        self.contractions
    }

    /// Extends `matching` in place with greedily chosen pairs of unmatched
    /// vertices. Existing pairs are never touched.
    pub fn extend<V>(&mut self, graph: &Graph<V>, matching: &mut Matching) {
        self.pairs_added = 0;
        self.contractions = 0;

        let mut subgraph = AvailableSubgraph::unmatched(graph, matching);
        if subgraph.alive.is_empty() {
            return;
        }

        while let Some(&any) = subgraph.alive.first() {
            if let Some(&v) = subgraph.degree_one.first() {
                self.match_first(&mut subgraph, v, matching);
            } else if let Some(&v) = subgraph.degree_two.first() {
                subgraph.contract(v);
                self.contractions += 1;
            } else {
                self.match_first(&mut subgraph, any, matching);
            }
        }

        let leftovers: Vec<Witness> = subgraph
            .contracted
            .iter()
            .copied()
            .filter(|&(u, w)| matching.mate(u).is_none() && matching.mate(w).is_none())
            .collect();
        let mut forest = AvailableSubgraph::from_witnesses(graph.node_count(), &leftovers);
        while let Some(&v) = forest.degree_one.first() {
            self.match_first(&mut forest, v, matching);
        }

        debug!(
            "greedy stage added {} pairs with {} contractions",
            self.pairs_added, self.contractions
        );
    }

    fn match_first(&mut self, subgraph: &mut AvailableSubgraph, v: usize, matching: &mut Matching) {
        match subgraph.first_neighbor(v) {
            Some(w) => {
                if subgraph.match_clusters(v, w, matching) {
                    self.pairs_added += 1;
                }
            }
            None => subgraph.update_degree(v),
        }
    }
}

impl Algorithm for GreedyMatcher {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("greedy_matching")
    }

    fn name(&self) -> &'static str {
        "Greedy Matching with Degree Reductions"
    }

    fn category(&self) -> &'static str {
        "graph_matching"
    }

    fn description(&self) -> String {
        "Near-linear heuristic: matches degree-one vertices, contracts degree-two \
         vertices, otherwise matches an arbitrary edge. Produces a valid, not \
         necessarily maximum, matching."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(m log n)".to_string(),
            space_complexity: "O(n + m)".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        Vec::new()
    }

    fn set_parameter(&mut self, name: &str, _value: &str) -> Result<(), AlgorithmError> {
        Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: "greedy matching takes no parameters".to_string(),
        })
    }

    fn get_parameter(&self, _name: &str) -> Option<String> {
        None
    }
}

impl MatchingAlgorithm for GreedyMatcher {
    fn find_matching<V>(
        &mut self,
        graph: &Graph<V>,
        seed: Option<&Matching>,
    ) -> Result<Matching, AlgorithmError>
    where
        V: Clone + Eq + Hash + Debug,
    {
        let mut matching = match seed {
            Some(seed) if seed.node_count() != graph.node_count() => {
                return Err(AlgorithmError::InvalidSeed(format!(
                    "seed covers {} vertices, graph has {}",
                    seed.node_count(),
                    graph.node_count()
                )))
            }
            Some(seed) => seed.clone(),
            None => Matching::empty_for(graph),
        };
        self.extend(graph, &mut matching);
        Ok(matching)
    }

    fn guarantees_maximum(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvalidGraphPolicy;
    use crate::validation::correctness::verify_matching;

    fn graph(n: u32, edges: &[(u32, u32)]) -> Graph<u32> {
        Graph::from_edges(0..n, edges.iter().copied(), InvalidGraphPolicy::Reject).unwrap()
    }

    fn greedy(graph: &Graph<u32>) -> Matching {
        GreedyMatcher::new().find_matching(graph, None).unwrap()
    }

    #[test]
    fn test_empty_graph() {
        let g = graph(0, &[]);
        assert!(greedy(&g).is_empty());
    }

    #[test]
    fn test_path_is_matched_perfectly() {
        // degree-one peeling finds the optimum on trees
        let g = graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
        let matching = greedy(&g);
        assert_eq!(matching.cardinality(), 3);
        verify_matching(&g, &matching).unwrap();
    }

    #[test]
    fn test_star_gets_one_pair() {
        let g = graph(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let matching = greedy(&g);
        assert_eq!(matching.cardinality(), 1);
    }

    #[test]
    fn test_cycle_uses_contraction() {
        let g = graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let mut matcher = GreedyMatcher::new();
        let matching = matcher.find_matching(&g, None).unwrap();

        assert!(matcher.contractions() > 0);
        assert_eq!(matching.cardinality(), 3);
        assert_eq!(matcher.pairs_added(), 3);
        verify_matching(&g, &matching).unwrap();
    }

    #[test]
    fn test_dense_graph_is_valid() {
        let mut edges = Vec::new();
        for u in 0..7 {
            for w in (u + 1)..7 {
                edges.push((u, w));
            }
        }
        let g = graph(7, &edges);
        let matching = greedy(&g);
        assert_eq!(matching.cardinality(), 3);
        verify_matching(&g, &matching).unwrap();
    }

    #[test]
    fn test_seed_pairs_are_kept() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut seed = Matching::empty_for(&g);
        seed.pair(1, 2);

        let mut matcher = GreedyMatcher::new();
        let matching = matcher.find_matching(&g, Some(&seed)).unwrap();
        assert_eq!(matching.mate(1), Some(2));
        assert_eq!(matching.cardinality(), 1);
        assert_eq!(matcher.pairs_added(), 0);
    }

    #[test]
    fn test_seed_size_mismatch() {
        let g = graph(4, &[(0, 1)]);
        let seed = Matching::new(2);
        let err = GreedyMatcher::new().find_matching(&g, Some(&seed)).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidSeed(_)));
    }

    #[test]
    fn test_no_parameters() {
        let mut matcher = GreedyMatcher::new();
        assert!(matcher.parameters().is_empty());
        assert!(matcher.set_parameter("anything", "1").is_err());
        assert!(!matcher.guarantees_maximum());
    }
}
