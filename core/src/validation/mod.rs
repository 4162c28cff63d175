//! Verification of matching results
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod correctness;

pub use self::correctness::{
    exhaustive_maximum_cardinality, verify_matching, VerificationError, EXHAUSTIVE_VERTEX_LIMIT,
};
