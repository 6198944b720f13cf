//! # Parse Options Module
//!
//! This module defines the options that steer the nutrition parsing pipeline
//! and the stages it moves through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration options for the nutrition parsing pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Whether to fall back to separator-tolerant parsing when strict parsing finds nothing
    pub enable_flexible_fallback: bool,
    /// Whether to fall back to keyword scanning when both line parsers find nothing
    pub enable_keyword_fallback: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            enable_flexible_fallback: true,
            enable_keyword_fallback: true,
        }
    }
}

impl ParseOptions {
    /// Options that only accept the strict `name | value | unit | reasoning` format
    pub fn strict_only() -> Self {
        Self {
            enable_flexible_fallback: false,
            enable_keyword_fallback: false,
        }
    }

    /// Check whether a given stage may run under these options
    pub fn allows(&self, stage: ParseStage) -> bool {
        match stage {
            ParseStage::Strict => true,
            ParseStage::Flexible => self.enable_flexible_fallback,
            ParseStage::Keyword => self.enable_keyword_fallback,
        }
    }
}

/// The parsing strategies of the fallback chain, in the order they run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    /// Pipe-delimited lines with three or four fields
    Strict,
    /// Any of several separators, value and unit possibly fused
    Flexible,
    /// Free-text scan for known nutrient keywords
    Keyword,
}

impl ParseStage {
    /// All stages in fallback order
    pub const ORDER: [ParseStage; 3] = [ParseStage::Strict, ParseStage::Flexible, ParseStage::Keyword];
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::Strict => write!(f, "strict"),
            ParseStage::Flexible => write!(f, "flexible"),
            ParseStage::Keyword => write!(f, "keyword"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_every_stage() {
        let options = ParseOptions::default();
        for stage in ParseStage::ORDER {
            assert!(options.allows(stage), "{stage} should be enabled");
        }
    }

    #[test]
    fn test_strict_only() {
        let options = ParseOptions::strict_only();
        assert!(options.allows(ParseStage::Strict));
        assert!(!options.allows(ParseStage::Flexible));
        assert!(!options.allows(ParseStage::Keyword));
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&ParseStage::Keyword).unwrap();
        assert_eq!(json, "\"keyword\"");
        assert_eq!(ParseStage::Flexible.to_string(), "flexible");
    }
}
