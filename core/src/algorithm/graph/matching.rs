//! Maximum-cardinality matching in general graphs
//!
//! Edmonds' blossom-contraction algorithm, driven in two stages:
//! 1. the greedy heuristic ([`GreedyMatcher`]) builds a large valid matching
//!    in near-linear time;
//! 2. augmenting-path searches ([`AugmentingSearch`]) run until one fails.
//!
//! Each successful search adds exactly one pair. By Berge's theorem a
//! matching without augmenting paths is maximum, so the first failing
//! search certifies the result.
//!
//! # Error Policy
//! Well-formed input never fails. Malformed adjacency or seed data is
//! rejected or dropped according to [`MatchingConfig::invalid_graph_policy`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::augment::AugmentingSearch;
use crate::algorithm::graph::greedy::GreedyMatcher;
use crate::algorithm::traits::{
    parse_bool_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId,
    AlgorithmParameter, MatchingAlgorithm, ParameterType,
};
use crate::config::{InvalidGraphPolicy, MatchingConfig};
use crate::data_structures::graph::Graph;
use crate::data_structures::matching::Matching;
use crate::validation::correctness::verify_matching;

/// Counters of one matching run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingStatistics {
    /// Pairs supplied by the seed matching
    pub seed_pairs: usize,
    /// Pairs added by the greedy stage
    pub greedy_pairs: usize,
    /// Augmenting-path searches run, including the final failing one
    pub searches: usize,
    pub augmentations: usize,
    pub blossoms_contracted: usize,
    pub vertices_explored: usize,
    pub cardinality: usize,
    pub execution_time_ms: f64,
}

impl MatchingStatistics {
    pub fn to_json(&self) -> Result<String, AlgorithmError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Edmonds' blossom algorithm for maximum-cardinality matching
#[derive(Debug, Clone, Default)]
pub struct EdmondsMatching {
    config: MatchingConfig,
    statistics: MatchingStatistics,
}

impl EdmondsMatching {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatchingConfig) -> Self {
        Self {
            config,
            statistics: MatchingStatistics::default(),
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Statistics of the most recent run
    pub fn statistics(&self) -> &MatchingStatistics {
        &self.statistics
    }

    /// Computes a maximum matching of `graph`, starting from `seed` when
    /// given. The seed is extended, never discarded: its pairs may be
    /// rewired by augmentations but the cardinality only grows.
    pub fn compute<V>(&mut self, graph: &Graph<V>, seed: Option<&Matching>) -> Result<Matching, AlgorithmError>
    where
        V: Clone + Eq + Hash + Debug,
    {
        let started = Instant::now();
        self.statistics = MatchingStatistics::default();

        let mut matching = match seed {
            Some(seed) => {
                verify_matching(graph, seed).map_err(|e| AlgorithmError::InvalidSeed(e.to_string()))?;
                seed.clone()
            }
            None => Matching::empty_for(graph),
        };
        self.statistics.seed_pairs = matching.cardinality();

        if self.config.greedy_initialization {
            let mut greedy = GreedyMatcher::new();
            greedy.extend(graph, &mut matching);
            self.statistics.greedy_pairs = greedy.pairs_added();
        }

        loop {
            let outcome = AugmentingSearch::new(graph).run(&mut matching)?;
            self.statistics.searches += 1;
            self.statistics.blossoms_contracted += outcome.blossoms_contracted;
            self.statistics.vertices_explored += outcome.vertices_explored;
            if !outcome.augmented {
                break;
            }
            self.statistics.augmentations += 1;
        }

        if self.config.verify_result {
            verify_matching(graph, &matching)
                .map_err(|e| AlgorithmError::InvariantViolation(e.to_string()))?;
        }

        self.statistics.cardinality = matching.cardinality();
        self.statistics.execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            "maximum matching of {} pairs on {} vertices ({} greedy, {} augmentations, {} blossoms)",
            self.statistics.cardinality,
            graph.node_count(),
            self.statistics.greedy_pairs,
            self.statistics.augmentations,
            self.statistics.blossoms_contracted
        );
        Ok(matching)
    }
}

impl Algorithm for EdmondsMatching {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("edmonds_matching")
    }

    fn name(&self) -> &'static str {
        "Edmonds' Maximum Cardinality Matching"
    }

    fn category(&self) -> &'static str {
        "graph_matching"
    }

    fn description(&self) -> String {
        "Edmonds' blossom-contraction algorithm for maximum-cardinality matching in \
         general graphs. A greedy pre-matching with degree-one and degree-two \
         reductions seeds repeated breadth-first augmenting-path searches that \
         contract odd cycles into blossoms."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(n m α(n))".to_string(),
            space_complexity: "O(n + m)".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        let boolean = |name: &str, value: bool| AlgorithmParameter {
            name: name.to_string(),
            value: value.to_string(),
            value_type: ParameterType::Boolean,
        };

        vec![
            boolean("greedy_initialization", self.config.greedy_initialization),
            AlgorithmParameter {
                name: "invalid_graph_policy".to_string(),
                value: self.config.invalid_graph_policy.to_string(),
                value_type: ParameterType::Enum(
                    InvalidGraphPolicy::VARIANTS.iter().map(|v| v.to_string()).collect(),
                ),
            },
            boolean("verify_result", self.config.verify_result),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "greedy_initialization" => {
                self.config.greedy_initialization = parse_bool_parameter(name, value)?;
            }
            "invalid_graph_policy" => {
                self.config.invalid_graph_policy = value.parse()?;
            }
            "verify_result" => {
                self.config.verify_result = parse_bool_parameter(name, value)?;
            }
            _ => {
                return Err(AlgorithmError::InvalidParameter {
                    name: name.to_string(),
                    reason: "unknown parameter. Valid parameters: greedy_initialization, \
                             invalid_graph_policy, verify_result"
                        .to_string(),
                })
            }
        }
        debug!("parameter {} set to {}", name, value);
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }
}

impl MatchingAlgorithm for EdmondsMatching {
    fn find_matching<V>(&mut self, graph: &Graph<V>, seed: Option<&Matching>) -> Result<Matching, AlgorithmError>
    where
        V: Clone + Eq + Hash + Debug,
    {
        self.compute(graph, seed)
    }

    fn guarantees_maximum(&self) -> bool {
        true
    }
}

/// Computes a maximum matching over opaque identities.
///
/// `neighbors` is the adjacency oracle and must describe a simple undirected
/// graph; defects are rejected with [`AlgorithmError::InvalidGraph`]. The
/// result maps every matched vertex to its partner in both directions;
/// unmatched vertices are absent.
pub fn compute_maximum_matching<V, I, F, N>(
    vertices: I,
    neighbors: F,
    seed: Option<&HashMap<V, V>>,
) -> Result<HashMap<V, V>, AlgorithmError>
where
    V: Clone + Eq + Hash + Debug,
    I: IntoIterator<Item = V>,
    F: FnMut(&V) -> N,
    N: IntoIterator<Item = V>,
{
    compute_maximum_matching_with(vertices, neighbors, seed, MatchingConfig::default())
}

/// [`compute_maximum_matching`] with an explicit configuration
pub fn compute_maximum_matching_with<V, I, F, N>(
    vertices: I,
    neighbors: F,
    seed: Option<&HashMap<V, V>>,
    config: MatchingConfig,
) -> Result<HashMap<V, V>, AlgorithmError>
where
    V: Clone + Eq + Hash + Debug,
    I: IntoIterator<Item = V>,
    F: FnMut(&V) -> N,
    N: IntoIterator<Item = V>,
{
    let graph = Graph::from_adjacency(vertices, neighbors, config.invalid_graph_policy)?;
    let seed = seed
        .map(|seed| Matching::from_seed(&graph, seed, config.invalid_graph_policy))
        .transpose()?;

    let mut engine = EdmondsMatching::with_config(config);
    let matching = engine.compute(&graph, seed.as_ref())?;
    Ok(matching.to_map(&graph))
}
