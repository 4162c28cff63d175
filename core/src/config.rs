//! Engine configuration
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::AlgorithmError;

/// What to do with adjacency data that does not describe a simple
/// undirected graph (self-loops, one-directional arcs, unknown neighbors)
/// or with seed pairs that are not matching edges of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidGraphPolicy {
    /// Fail with a descriptive error naming the offending vertices
    #[default]
    Reject,
    /// Drop the offending loops, arcs and seed pairs
    Ignore,
}

impl InvalidGraphPolicy {
    pub const VARIANTS: [&'static str; 2] = ["reject", "ignore"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Ignore => "ignore",
        }
    }
}

impl Display for InvalidGraphPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvalidGraphPolicy {
    type Err = AlgorithmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            _ => Err(AlgorithmError::InvalidParameter {
                name: "invalid_graph_policy".to_string(),
                reason: format!(
                    "unknown policy {:?}. Valid options: {}",
                    value,
                    Self::VARIANTS.join(", ")
                ),
            }),
        }
    }
}

/// Configuration of a matching run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Seed the exact stage with the greedy heuristic
    pub greedy_initialization: bool,

    /// Handling of malformed adjacency and seed data
    pub invalid_graph_policy: InvalidGraphPolicy,

    /// Re-check the final matching against the graph before returning it
    pub verify_result: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            greedy_initialization: true,
            invalid_graph_policy: InvalidGraphPolicy::Reject,
            verify_result: true,
        }
    }
}

impl MatchingConfig {
    /// Parses a configuration from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AlgorithmError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, AlgorithmError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchingConfig::default();
        assert!(config.greedy_initialization);
        assert!(config.verify_result);
        assert_eq!(config.invalid_graph_policy, InvalidGraphPolicy::Reject);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MatchingConfig::from_json(r#"{ "invalid_graph_policy": "ignore" }"#).unwrap();
        assert_eq!(config.invalid_graph_policy, InvalidGraphPolicy::Ignore);
        assert!(config.greedy_initialization);
    }

    #[test]
    fn test_json_round_trip() {
        let config = MatchingConfig {
            greedy_initialization: false,
            invalid_graph_policy: InvalidGraphPolicy::Ignore,
            verify_result: false,
        };
        let json = config.to_json().unwrap();
        assert_eq!(MatchingConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        let err = MatchingConfig::from_json(r#"{ "invalid_graph_policy": "panic" }"#).unwrap_err();
        assert!(matches!(err, AlgorithmError::Configuration(_)));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("ignore".parse::<InvalidGraphPolicy>().unwrap(), InvalidGraphPolicy::Ignore);
        assert_eq!(InvalidGraphPolicy::Reject.to_string(), "reject");
        assert!("strict".parse::<InvalidGraphPolicy>().is_err());
    }
}
