// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Label Value Object with Identifier Grammar Invariants

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::IdentifierRules;
use crate::errors::{BuilderError, BuilderResult};

/// Validate a label against the default identifier grammar
///
/// Pure check with no side effects; see [`IdentifierRules`] for the grammar.
///
/// ```rust
/// use cim_infrastructure_builder::validate_id;
///
/// assert!(validate_id("myFunction").is_ok());
/// assert!(validate_id("my-bad id-for my event").is_err());
/// ```
pub fn validate_id(label: &str) -> BuilderResult<()> {
    validate_id_with(label, &IdentifierRules::default())
}

/// Validate a label against custom identifier rules
pub fn validate_id_with(label: &str, rules: &IdentifierRules) -> BuilderResult<()> {
    let invalid = |reason: String| BuilderError::InvalidIdentifier {
        label: label.to_string(),
        reason,
    };

    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("identifier is empty".to_string()));
    };

    let length = label.chars().count();
    if length > rules.max_length {
        return Err(invalid(format!(
            "length {} exceeds maximum of {}",
            length, rules.max_length
        )));
    }

    if !first.is_ascii_alphabetic() {
        return Err(invalid(format!("must start with a letter, found '{}'", first)));
    }

    for ch in chars {
        if ch.is_whitespace() {
            return Err(invalid("whitespace is not allowed".to_string()));
        }
        if !ch.is_ascii_alphanumeric() && !rules.is_separator(ch) {
            return Err(invalid(format!("invalid character '{}'", ch)));
        }
    }

    if label.chars().last().is_some_and(|ch| rules.is_separator(ch)) {
        return Err(invalid("cannot end with a separator".to_string()));
    }

    Ok(())
}

/// User-supplied label of a resource or event
///
/// Always satisfies the identifier grammar it was validated against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceLabel(String);

impl ResourceLabel {
    /// Create a label validated against the default grammar
    pub fn new(label: impl Into<String>) -> BuilderResult<Self> {
        Self::with_rules(label, &IdentifierRules::default())
    }

    /// Create a label validated against custom rules
    pub fn with_rules(label: impl Into<String>, rules: &IdentifierRules) -> BuilderResult<Self> {
        let label = label.into();
        validate_id_with(&label, rules)?;
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ResourceLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ResourceLabel {
    type Error = BuilderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ResourceLabel {
    type Error = BuilderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
