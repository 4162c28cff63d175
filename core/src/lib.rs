//! Blossom matching framework
//!
//! Maximum-cardinality matching in general graphs by Edmonds' blossom
//! contraction, fed by a greedy pre-matching stage.
//!
//! ```
//! use std::collections::HashMap;
//! use blossom_core::compute_maximum_matching;
//!
//! let cycle: HashMap<u32, Vec<u32>> =
//!     [(1, vec![2, 5]), (2, vec![1, 3]), (3, vec![2, 4]), (4, vec![3, 5]), (5, vec![4, 1])]
//!         .into_iter()
//!         .collect();
//! let pairs = compute_maximum_matching(1..=5u32, |v| cycle[v].clone(), None).unwrap();
//! assert_eq!(pairs.len(), 4);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod oracle;
pub mod validation;

pub use crate::algorithm::graph::matching::{
    compute_maximum_matching, compute_maximum_matching_with, EdmondsMatching, MatchingStatistics,
};
pub use crate::algorithm::traits::{AlgorithmError, NodeId};
pub use crate::config::{InvalidGraphPolicy, MatchingConfig};
pub use crate::data_structures::graph::Graph;
pub use crate::data_structures::matching::Matching;
