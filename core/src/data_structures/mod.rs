//! Core data structures for matching
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod disjoint_set;
pub mod graph;
pub mod matching;

pub use self::disjoint_set::DisjointSet;
pub use self::graph::Graph;
pub use self::matching::Matching;
