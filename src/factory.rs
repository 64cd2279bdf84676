// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource and Event Factories
//!
//! Factories check presence of every required argument, validate the label,
//! allocate identity, and only then build the handle. A failed call never
//! leaves a partially constructed resource behind.

use tracing::{debug, warn};

use crate::config::BuilderConfig;
use crate::domain::{Event, Resource, ResourceConfig, ResourceKind, ResourceLabel};
use crate::errors::{BuilderError, BuilderResult};

/// Builds resources and events under a [`BuilderConfig`]
#[derive(Debug, Clone, Default)]
pub struct ResourceFactory {
    config: BuilderConfig,
}

impl ResourceFactory {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Declare a resource of `kind`
    ///
    /// `params` are the kind's required parameters in the order given by
    /// [`ResourceKind::required_params`].
    ///
    /// # Errors
    /// - [`BuilderError::MissingArgument`] if the label or a required parameter is empty
    /// - [`BuilderError::UnsupportedKind`] if `kind` is not a buildable resource
    /// - [`BuilderError::InvalidIdentifier`] if the label violates the grammar
    pub fn create_resource(
        &self,
        kind: ResourceKind,
        label: &str,
        params: &[&str],
    ) -> BuilderResult<Resource> {
        if label.is_empty() {
            return Err(BuilderError::MissingArgument { argument: "label" });
        }

        if !kind.is_buildable() {
            return Err(BuilderError::UnsupportedKind(kind));
        }

        let required = kind.required_params();
        for (i, name) in required.iter().enumerate() {
            if params.get(i).map_or(true, |value| value.is_empty()) {
                return Err(BuilderError::MissingArgument { argument: *name });
            }
        }
        if params.len() > required.len() {
            warn!(
                "Ignoring {} extra parameter(s) for {} resource {}",
                params.len() - required.len(),
                kind.as_str(),
                label
            );
        }

        let id = ResourceLabel::with_rules(label, &self.config.identifiers)?;

        let mut config = ResourceConfig::default();
        for (name, value) in required.iter().zip(params) {
            config.assign(name, value)?;
        }

        Ok(Resource::new(kind, id, config))
    }

    /// Declare a compute resource running on `runtime`
    pub fn compute(&self, label: &str, runtime: &str) -> BuilderResult<Resource> {
        self.create_resource(ResourceKind::Compute, label, &[runtime])
    }

    /// Declare an internal event usable as a trigger source
    ///
    /// # Errors
    /// - [`BuilderError::MissingArgument`] if `name` is empty
    /// - [`BuilderError::InvalidIdentifier`] if `name` violates the grammar
    pub fn create_event(&self, name: &str) -> BuilderResult<Event> {
        if name.is_empty() {
            return Err(BuilderError::MissingArgument { argument: "name" });
        }
        let name = ResourceLabel::with_rules(name, &self.config.identifiers)?;
        let event = Event::new(name);
        debug!(
            "Declared internal event {} ({})",
            event.name(),
            event.metadata().instance_id()
        );
        Ok(event)
    }
}

/// Declare a resource with the default identifier rules
pub fn create_resource(kind: ResourceKind, label: &str, params: &[&str]) -> BuilderResult<Resource> {
    ResourceFactory::default().create_resource(kind, label, params)
}

/// Declare a compute resource with the default identifier rules
pub fn compute(label: &str, runtime: &str) -> BuilderResult<Resource> {
    ResourceFactory::default().compute(label, runtime)
}

/// Declare an internal event with the default identifier rules
pub fn create_event(name: &str) -> BuilderResult<Event> {
    ResourceFactory::default().create_event(name)
}
