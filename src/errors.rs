// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for resource graph construction

use thiserror::Error;

use crate::domain::ResourceKind;

/// Errors that can occur while declaring resources and connections
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A required construction parameter was empty or absent
    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: &'static str },

    /// A label or name does not satisfy the identifier grammar
    #[error("Invalid identifier '{label}': {reason}")]
    InvalidIdentifier { label: String, reason: String },

    /// Attempt to overwrite a sealed identity field
    #[error("Field '{field}' is immutable after construction")]
    ImmutableField { field: String },

    /// Attempt to set a configuration field that does not exist
    #[error("Unknown configuration field: {field}")]
    UnknownField { field: String },

    /// A string does not name any resource kind
    #[error("Unknown resource kind: {kind}")]
    UnknownKind { kind: String },

    /// The kind cannot be built through the resource factory
    #[error("Resource kind '{0}' cannot be created as a resource")]
    UnsupportedKind(ResourceKind),

    /// References form a cycle, so no deployment order exists
    #[error("Cyclic reference detected at resource '{label}'")]
    CyclicReference { label: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for resource graph construction
pub type BuilderResult<T> = Result<T, BuilderError>;

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Serialization(err.to_string())
    }
}
