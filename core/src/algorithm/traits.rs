//! Core algorithm trait definitions for the blossom matching engine
//!
//! This module establishes the trait system shared by every matching
//! implementation in the crate: identifiers, the string parameter interface,
//! complexity descriptions and the common error type.
//!
//! # Key Design Principles
//! - Dense node identifiers, never mixed with raw indices in public APIs
//! - Parameters validated on assignment, not on use
//! - Errors carry the offending identities in human-readable form
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::data_structures::graph::Graph;
use crate::data_structures::matching::Matching;

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Dense node identifier assigned when a graph is loaded
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Boolean,
    Enum(Vec<String>),
}

/// Error type shared by graph loading, matching and configuration
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Invalid seed matching: {0}")]
    InvalidSeed(String),

    #[error("Structure tree invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] serde_json::Error),
}

/// Asymptotic complexity of an algorithm in Big-O notation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g. graph_matching)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description
    fn description(&self) -> String;

    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;
}

/// Matching algorithm trait specialization
pub trait MatchingAlgorithm: Algorithm {
    /// Computes a matching of `graph`, extending `seed` when one is given.
    ///
    /// # Guarantees
    /// - The returned matching is valid (symmetric, at most one partner each)
    /// - Maximum cardinality if [`guarantees_maximum`](Self::guarantees_maximum)
    fn find_matching<V>(
        &mut self,
        graph: &Graph<V>,
        seed: Option<&Matching>,
    ) -> Result<Matching, AlgorithmError>
    where
        V: Clone + Eq + Hash + Debug;

    /// Returns whether the algorithm guarantees maximum cardinality
    fn guarantees_maximum(&self) -> bool;
}

pub(crate) fn parse_bool_parameter(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected true or false, got {:?}", value),
        }),
    }
}
