// Copyright (c) 2025 - Cowboy AI, Inc.
//! Builder configuration

use serde::{Deserialize, Serialize};

/// Grammar applied to resource labels and event names
///
/// A label starts with an ASCII letter, continues with ASCII letters, digits
/// or one of `separators`, never contains whitespace and never ends with a
/// separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierRules {
    /// Maximum label length in characters
    pub max_length: usize,
    /// Non-alphanumeric characters permitted after the first character
    pub separators: Vec<char>,
}

impl IdentifierRules {
    /// Default maximum label length
    pub const DEFAULT_MAX_LENGTH: usize = 255;

    /// Check whether `ch` is one of the configured separators
    pub fn is_separator(&self, ch: char) -> bool {
        self.separators.contains(&ch)
    }
}

impl Default for IdentifierRules {
    fn default() -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            separators: vec!['-', '_'],
        }
    }
}

/// Configuration for a [`ResourceFactory`](crate::factory::ResourceFactory)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Identifier grammar for labels and event names
    pub identifiers: IdentifierRules,
}

impl BuilderConfig {
    /// Use custom identifier rules
    pub fn with_identifiers(mut self, identifiers: IdentifierRules) -> Self {
        self.identifiers = identifiers;
        self
    }
}
