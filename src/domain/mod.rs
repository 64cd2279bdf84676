// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Graph Domain Models
//!
//! Core concepts for declaring infrastructure: resources with a sealed
//! identity and a mutable configuration, internal events, and the directed
//! connections between them.
//!
//! # Value Objects with Invariants
//!
//! - [`ResourceLabel`] - user label satisfying the identifier grammar
//! - [`InstanceId`] - internally allocated, process-unique identity
//! - [`ResourceKind`] - closed resource taxonomy
//! - [`Metadata`] - sealed identity block
//!
//! # Entities
//!
//! - [`Resource`] - declared resource with fluent configuration
//! - [`Event`] - internal event, usable as a trigger source
//!
//! # Connections
//!
//! - [`Trigger`] - event → resource
//! - [`Reference`] - resource → resource with allowed actions

pub mod connection;
pub mod event;
pub mod identifier;
pub mod instance_id;
pub mod metadata;
pub mod resource;
pub mod resource_type;

pub use connection::{
    reference, trigger, Reference, ReferenceBuilder, ReferenceFrom, ReferenceTo, Trigger,
    TriggerBuilder, TriggerFrom,
};
pub use event::Event;
pub use identifier::{validate_id, validate_id_with, ResourceLabel};
pub use instance_id::InstanceId;
pub use metadata::Metadata;
pub use resource::{CodeSource, Resource, ResourceConfig, REFERENCE_SUFFIX};
pub use resource_type::ResourceKind;
