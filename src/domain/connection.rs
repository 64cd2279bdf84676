// Copyright (c) 2025 - Cowboy AI, Inc.
//! Connection Builders
//!
//! Directed edges between declared resources:
//!
//! - [`Trigger`]: an [`Event`] causes a [`Resource`] to execute
//! - [`Reference`]: a resource may perform the `allow` actions on a target
//!
//! Both are assembled through typestate chains, so an edge with a missing
//! endpoint cannot be produced:
//!
//! ```rust
//! use cim_infrastructure_builder::{compute, create_event, reference, trigger};
//!
//! let worker = compute("worker", "nodejs20.x").unwrap();
//! let table = compute("ordersTable", "python3.12").unwrap();
//! let tick = create_event("tick").unwrap();
//!
//! let t = trigger().from(&tick).to(&worker);
//! assert!(t.is_to(&worker));
//!
//! let r = reference("orders").from(&worker).to(&table).allow(["read"]);
//! assert_eq!(r.allow(), ["read".to_string()]);
//! ```
//!
//! Endpoints are live handles. The endpoint that normally owns the edge
//! (the trigger destination, the reference source) is held weakly so a
//! resource never keeps itself alive through its own edge lists.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

use super::resource::WeakResource;
use super::{Event, Resource};

/// Start a trigger chain: `trigger().from(event).to(resource)`
pub fn trigger() -> TriggerBuilder {
    TriggerBuilder { _private: () }
}

/// Start a reference chain: `reference(name).from(source).to(target).allow(actions)`
pub fn reference(name: impl Into<String>) -> ReferenceBuilder {
    ReferenceBuilder { name: name.into() }
}

/// Trigger chain awaiting its source event
#[derive(Debug)]
pub struct TriggerBuilder {
    _private: (),
}

impl TriggerBuilder {
    pub fn from(self, event: &Event) -> TriggerFrom {
        TriggerFrom {
            from: event.clone(),
        }
    }
}

/// Trigger chain awaiting its destination resource
#[derive(Debug)]
pub struct TriggerFrom {
    from: Event,
}

impl TriggerFrom {
    pub fn to(self, resource: &Resource) -> Trigger {
        Trigger {
            from: self.from,
            to: resource.downgrade(),
        }
    }
}

/// "This event causes that resource to execute"
#[derive(Clone)]
pub struct Trigger {
    from: Event,
    to: WeakResource,
}

impl Trigger {
    /// Source event
    pub fn from(&self) -> &Event {
        &self.from
    }

    /// Destination resource, if it is still alive
    pub fn to(&self) -> Option<Resource> {
        self.to.upgrade()
    }

    /// Whether `resource` is this trigger's destination
    pub fn is_to(&self, resource: &Resource) -> bool {
        self.to.points_to(resource)
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("from", &self.from.name())
            .field("to", &self.to.label())
            .finish()
    }
}

impl Serialize for Trigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Trigger", 2)?;
        state.serialize_field("from", self.from.name())?;
        state.serialize_field("to", &self.to.label())?;
        state.end()
    }
}

/// Reference chain awaiting its source resource
#[derive(Debug)]
pub struct ReferenceBuilder {
    name: String,
}

impl ReferenceBuilder {
    pub fn from(self, resource: &Resource) -> ReferenceFrom {
        ReferenceFrom {
            name: self.name,
            from: resource.downgrade(),
        }
    }
}

/// Reference chain awaiting its target resource
#[derive(Debug)]
pub struct ReferenceFrom {
    name: String,
    from: WeakResource,
}

impl ReferenceFrom {
    pub fn to(self, target: &Resource) -> ReferenceTo {
        ReferenceTo {
            name: self.name,
            from: self.from,
            to: target.clone(),
        }
    }
}

/// Reference chain awaiting its allowed actions
#[derive(Debug)]
pub struct ReferenceTo {
    name: String,
    from: WeakResource,
    to: Resource,
}

impl ReferenceTo {
    pub fn allow<I, S>(self, actions: I) -> Reference
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Reference {
            name: self.name,
            from: self.from,
            to: self.to,
            allow: actions.into_iter().map(Into::into).collect(),
        }
    }
}

/// "The source resource may perform `allow` actions against the target"
#[derive(Clone)]
pub struct Reference {
    name: String,
    from: WeakResource,
    to: Resource,
    allow: Vec<String>,
}

impl Reference {
    /// Alias under which the source refers to the target
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source resource, if it is still alive
    pub fn from(&self) -> Option<Resource> {
        self.from.upgrade()
    }

    /// Whether `resource` is this reference's source
    pub fn is_from(&self, resource: &Resource) -> bool {
        self.from.points_to(resource)
    }

    pub fn to(&self) -> &Resource {
        &self.to
    }

    pub fn allow(&self) -> &[String] {
        &self.allow
    }

    pub fn allows(&self, action: &str) -> bool {
        self.allow.iter().any(|a| a == action)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("name", &self.name)
            .field("from", &self.from.label())
            .field("to", &self.to.id())
            .field("allow", &self.allow)
            .finish()
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Reference", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("from", &self.from.label())?;
        state.serialize_field("to", self.to.id())?;
        state.serialize_field("allow", &self.allow)?;
        state.end()
    }
}
