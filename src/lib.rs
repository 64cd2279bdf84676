//! Declarative infrastructure resource graphs for the Composable Information Machine
//!
//! Callers declare compute resources and internal events, then wire them
//! together with triggers and references. The result is an in-memory graph of
//! live handles that an external deployment or serialization layer consumes.
//!
//! ```rust
//! use cim_infrastructure_builder::{compute, create_event, ResourceGraph};
//!
//! let table = compute("ordersTable", "python3.12")?;
//! let handler = compute("orderHandler", "nodejs20.x")?;
//! let placed = create_event("orderPlaced")?;
//!
//! handler
//!     .set_code("exports.handler = async () => {}")
//!     .set_env("TABLE", table.id())
//!     .on_event(&placed)
//!     .uses(&table, ["read", "write"], None);
//!
//! let graph = ResourceGraph::from_roots(&[handler]);
//! assert_eq!(graph.node_count(), 3);
//! # Ok::<(), cim_infrastructure_builder::BuilderError>(())
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod factory;
pub mod graph;

// Re-export commonly used types
pub use config::{BuilderConfig, IdentifierRules};
pub use domain::{
    reference, trigger, validate_id, validate_id_with, CodeSource, Event, InstanceId, Metadata,
    Reference, Resource, ResourceConfig, ResourceKind, ResourceLabel, Trigger, REFERENCE_SUFFIX,
};
pub use errors::{BuilderError, BuilderResult};
pub use factory::{compute, create_event, create_resource, ResourceFactory};
pub use graph::{GraphEdge, GraphNode, ResourceGraph};
