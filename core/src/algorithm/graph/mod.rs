//! Graph matching algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod augment;
pub mod greedy;
pub mod matching;

pub use self::augment::{augment, AugmentingSearch, SearchOutcome, StructureTree, TreeNode};
pub use self::greedy::GreedyMatcher;
pub use self::matching::{EdmondsMatching, MatchingStatistics};
