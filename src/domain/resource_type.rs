// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Kind Taxonomy
//!
//! Closed set of kinds a declared resource can have. Downstream consumers
//! match on [`ResourceKind`] for kind-specific behavior.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::BuilderError;

/// Kind tag carried in every resource's metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ResourceKind {
    /// Compute unit executing user code (function, container task)
    Compute,
    /// Internal named event, usable only as a trigger source
    InternalEvent,
}

impl ResourceKind {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::InternalEvent => "internal_event",
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::InternalEvent => "Internal Event",
        }
    }

    /// Names of the construction parameters a factory requires, in order
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Self::Compute => &["runtime"],
            Self::InternalEvent => &[],
        }
    }

    /// Whether the resource factory can build this kind
    pub fn is_buildable(&self) -> bool {
        matches!(self, Self::Compute)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ResourceKind {
    type Err = BuilderError;

    /// Parse from string representation, accepting common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compute" | "function" | "lambda" => Ok(Self::Compute),
            "internal_event" | "internalevent" | "event" => Ok(Self::InternalEvent),
            _ => Err(BuilderError::UnknownKind {
                kind: s.to_string(),
            }),
        }
    }
}
