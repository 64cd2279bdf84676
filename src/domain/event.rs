// Copyright (c) 2025 - Cowboy AI, Inc.
//! Internal Event Entity
//!
//! A named event with no configuration of its own. Its only use is as the
//! source of a [`Trigger`](super::Trigger).

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::rc::Rc;

use super::{Metadata, ResourceKind, ResourceLabel};

#[derive(Debug)]
struct EventNode {
    metadata: Metadata,
    name: ResourceLabel,
}

/// Shared handle to an internal event
///
/// Clones refer to the same event; equality is identity.
#[derive(Clone)]
pub struct Event(Rc<EventNode>);

impl Event {
    pub(crate) fn new(name: ResourceLabel) -> Self {
        Self(Rc::new(EventNode {
            metadata: Metadata::allocate(ResourceKind::InternalEvent),
            name,
        }))
    }

    pub fn metadata(&self) -> &Metadata {
        &self.0.metadata
    }

    pub fn name(&self) -> &str {
        self.0.name.as_str()
    }

    pub fn label(&self) -> &ResourceLabel {
        &self.0.name
    }

    /// Whether both handles point at the same event
    pub fn ptr_eq(&self, other: &Event) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Event {}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("metadata", &self.0.metadata)
            .field("name", &self.0.name)
            .finish()
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Event", 2)?;
        state.serialize_field("metadata", &self.0.metadata)?;
        state.serialize_field("name", &self.0.name)?;
        state.end()
    }
}
