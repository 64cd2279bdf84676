// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declared Resource Entity with Sealed Identity and Fluent Configuration
//!
//! A resource is split into two records:
//!
//! - **Identity** ([`Metadata`] and the user label): assigned once by the
//!   factory and never writable afterwards
//! - **Configuration** ([`ResourceConfig`]): mutated through the fluent
//!   methods during the build phase
//!
//! [`Resource`] is a shared handle. Every fluent method returns the handle it
//! was called on, so calls chain:
//!
//! ```rust
//! use cim_infrastructure_builder::{compute, create_event};
//!
//! let orders = compute("orders", "python3.12").unwrap();
//! let handler = compute("handler", "nodejs20.x").unwrap();
//! let created = create_event("orderCreated").unwrap();
//!
//! handler
//!     .set_description("Handles new orders")
//!     .set_env("LOG_LEVEL", "debug")
//!     .set_tag("team", "checkout")
//!     .on_event(&created)
//!     .uses(&orders, ["invoke"], None);
//!
//! assert_eq!(handler.references()[0].name(), "ordersRef");
//! ```
//!
//! Readers get owned snapshots ([`Resource::config`], [`Resource::triggers`],
//! [`Resource::references`]); no borrow of the configuration outlives a
//! single method call, so a fluent call may take arguments computed from the
//! same resource.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

use super::metadata::is_sealed;
use super::{reference, trigger, Event, Metadata, Reference, ResourceKind, ResourceLabel, Trigger};
use crate::errors::{BuilderError, BuilderResult};

/// Suffix appended to a target's label to name a reference without alias
pub const REFERENCE_SUFFIX: &str = "Ref";

/// Mutable configuration of a resource
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceConfig {
    /// Execution runtime (required for compute resources)
    pub runtime: String,

    /// Version control location of the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_control: Option<String>,

    /// Inline code body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub environment: BTreeMap<String, String>,

    pub tags: BTreeMap<String, String>,

    /// Triggers whose destination is this resource, in declaration order
    pub triggers: Vec<Trigger>,

    /// References whose source is this resource, in declaration order
    pub references: Vec<Reference>,
}

impl ResourceConfig {
    /// Assign a configuration field by name
    ///
    /// Map entries are addressed as `environment.<NAME>` / `tags.<KEY>`.
    pub(crate) fn assign(&mut self, field: &str, value: &str) -> BuilderResult<()> {
        if is_sealed(field) {
            return Err(BuilderError::ImmutableField {
                field: field.to_string(),
            });
        }

        match field {
            "runtime" => {
                if value.is_empty() {
                    return Err(BuilderError::MissingArgument { argument: "runtime" });
                }
                self.runtime = value.to_string();
            }
            "source_control" | "sourceControl" => self.source_control = Some(value.to_string()),
            "code" => self.code = Some(value.to_string()),
            "description" => self.description = Some(value.to_string()),
            _ => {
                if let Some(name) = field.strip_prefix("environment.").filter(|n| !n.is_empty()) {
                    self.environment.insert(name.to_string(), value.to_string());
                } else if let Some(key) = field.strip_prefix("tags.").filter(|k| !k.is_empty()) {
                    self.tags.insert(key.to_string(), value.to_string());
                } else {
                    return Err(BuilderError::UnknownField {
                        field: field.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Code location a consumer should deploy from
    ///
    /// Inline code wins over source control when both are set.
    pub fn effective_source(&self) -> Option<CodeSource<'_>> {
        match (&self.code, &self.source_control) {
            (Some(code), _) => Some(CodeSource::Inline(code)),
            (None, Some(url)) => Some(CodeSource::SourceControl(url)),
            (None, None) => None,
        }
    }
}

/// Where a compute resource's code comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSource<'a> {
    Inline(&'a str),
    SourceControl(&'a str),
}

#[derive(Debug)]
pub(crate) struct ResourceNode {
    metadata: Metadata,
    id: ResourceLabel,
    config: RefCell<ResourceConfig>,
}

/// Shared handle to a declared resource
///
/// Clones refer to the same resource, and equality is identity. Handles are
/// `!Send`: a build runs on one thread.
#[derive(Clone)]
pub struct Resource(Rc<ResourceNode>);

impl Resource {
    pub(crate) fn new(kind: ResourceKind, id: ResourceLabel, config: ResourceConfig) -> Self {
        let resource = Self(Rc::new(ResourceNode {
            metadata: Metadata::allocate(kind),
            id,
            config: RefCell::new(config),
        }));
        debug!(
            "Declared {} resource {} ({})",
            kind.as_str(),
            resource.id(),
            resource.metadata().instance_id()
        );
        resource
    }

    pub fn metadata(&self) -> &Metadata {
        &self.0.metadata
    }

    pub fn kind(&self) -> ResourceKind {
        self.0.metadata.kind()
    }

    /// User label, immutable after construction
    pub fn id(&self) -> &str {
        self.0.id.as_str()
    }

    pub fn label(&self) -> &ResourceLabel {
        &self.0.id
    }

    /// Snapshot of the current configuration
    ///
    /// Connections in the snapshot still point at the live endpoints.
    pub fn config(&self) -> ResourceConfig {
        self.0.config.borrow().clone()
    }

    /// Triggers whose destination is this resource, in declaration order
    pub fn triggers(&self) -> Vec<Trigger> {
        self.0.config.borrow().triggers.clone()
    }

    /// References whose source is this resource, in declaration order
    pub fn references(&self) -> Vec<Reference> {
        self.0.config.borrow().references.clone()
    }

    /// Whether both handles point at the same resource
    pub fn ptr_eq(&self, other: &Resource) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn downgrade(&self) -> WeakResource {
        WeakResource(Rc::downgrade(&self.0))
    }

    pub fn set_source_control(&self, url: impl Into<String>) -> &Self {
        let url = url.into();
        trace!("{}: source_control = {}", self.id(), url);
        let mut config = self.0.config.borrow_mut();
        if config.code.is_some() {
            warn!("{}: both inline code and source control set; inline code takes precedence", self.id());
        }
        config.source_control = Some(url);
        self
    }

    pub fn set_code(&self, content: impl Into<String>) -> &Self {
        let mut config = self.0.config.borrow_mut();
        if config.source_control.is_some() {
            warn!("{}: both inline code and source control set; inline code takes precedence", self.id());
        }
        config.code = Some(content.into());
        self
    }

    pub fn set_description(&self, text: impl Into<String>) -> &Self {
        self.0.config.borrow_mut().description = Some(text.into());
        self
    }

    /// Insert or overwrite one environment variable
    pub fn set_env(&self, name: impl Into<String>, value: impl Into<String>) -> &Self {
        let name = name.into();
        trace!("{}: environment.{} set", self.id(), name);
        self.0.config.borrow_mut().environment.insert(name, value.into());
        self
    }

    /// Insert or overwrite one tag
    pub fn set_tag(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.0.config.borrow_mut().tags.insert(key.into(), value.into());
        self
    }

    /// Execute this resource whenever `event` fires
    pub fn on_event(&self, event: &Event) -> &Self {
        let edge = trigger().from(event).to(self);
        debug!("Trigger {} -> {}", event.name(), self.id());
        self.0.config.borrow_mut().triggers.push(edge);
        self
    }

    /// Permit this resource to perform `actions` against `target`
    ///
    /// The reference is named `alias`, or `<target id>Ref` when no non-empty
    /// alias is given.
    ///
    /// The target is held strongly. Two resources that use each other keep
    /// each other alive until the process exits.
    pub fn uses<I, S>(&self, target: &Resource, actions: I, alias: Option<&str>) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = match alias {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => format!("{}{}", target.id(), REFERENCE_SUFFIX),
        };
        debug!("Reference {} -> {} as {}", self.id(), target.id(), name);
        let edge = reference(name).from(self).to(target).allow(actions);
        self.0.config.borrow_mut().references.push(edge);
        self
    }

    /// Set a configuration field by name
    ///
    /// Accepts `runtime`, `source_control`, `code`, `description`,
    /// `environment.<NAME>` and `tags.<KEY>`. Identity fields (`id`,
    /// `metadata`, `instance_id`, `type`, ...) fail with
    /// [`BuilderError::ImmutableField`].
    pub fn set_field(&self, field: &str, value: &str) -> BuilderResult<&Self> {
        self.0.config.borrow_mut().assign(field, value)?;
        trace!("{}: {} set", self.id(), field);
        Ok(self)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Resource {}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Resource");
        dbg.field("metadata", &self.0.metadata).field("id", &self.0.id);
        match self.0.config.try_borrow() {
            Ok(config) => dbg.field("config", &*config),
            Err(_) => dbg.field("config", &"<borrowed>"),
        };
        dbg.finish()
    }
}

#[derive(Serialize)]
struct ConfigView<'a> {
    id: &'a ResourceLabel,
    #[serde(flatten)]
    config: &'a ResourceConfig,
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let config = self.0.config.borrow();
        let mut state = serializer.serialize_struct("Resource", 2)?;
        state.serialize_field("metadata", &self.0.metadata)?;
        state.serialize_field(
            "config",
            &ConfigView {
                id: &self.0.id,
                config: &config,
            },
        )?;
        state.end()
    }
}

/// Non-owning handle used by the owning side of a connection
#[derive(Clone)]
pub(crate) struct WeakResource(Weak<ResourceNode>);

impl WeakResource {
    pub(crate) fn upgrade(&self) -> Option<Resource> {
        self.0.upgrade().map(Resource)
    }

    pub(crate) fn points_to(&self, resource: &Resource) -> bool {
        Weak::ptr_eq(&self.0, &Rc::downgrade(&resource.0))
    }

    pub(crate) fn label(&self) -> Option<String> {
        self.0.upgrade().map(|node| node.id.to_string())
    }
}

impl fmt::Debug for WeakResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakResource({:?})", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute, create_event};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fluent_methods_return_same_handle() {
        let r = compute("myFunction", "nodejs20.x").unwrap();

        let chained = r.set_tag("a", "b").set_env("x", "y");
        assert!(std::ptr::eq(chained, &r));
        assert!(std::ptr::eq(r.set_description("d"), &r));
        assert!(std::ptr::eq(r.set_code("exports.handler = () => {}"), &r));
        assert!(std::ptr::eq(r.set_source_control("https://git.example.com/fn.git"), &r));
    }

    #[test]
    fn test_map_fields_overwrite() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        r.set_env("LOG_LEVEL", "info").set_env("LOG_LEVEL", "debug");
        r.set_tag("team", "a").set_tag("team", "b").set_tag("env", "prod");

        let config = r.config();
        assert_eq!(config.environment.len(), 1);
        assert_eq!(config.environment["LOG_LEVEL"], "debug");
        assert_eq!(config.tags.len(), 2);
        assert_eq!(config.tags["team"], "b");
    }

    #[test]
    fn test_code_and_source_control_coexist() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        r.set_source_control("https://git.example.com/fn.git")
            .set_code("print('hi')");

        let config = r.config();
        assert_eq!(config.source_control.as_deref(), Some("https://git.example.com/fn.git"));
        assert_eq!(config.code.as_deref(), Some("print('hi')"));
        assert_eq!(config.effective_source(), Some(CodeSource::Inline("print('hi')")));
    }

    #[test]
    fn test_effective_source_falls_back_to_source_control() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        assert_eq!(r.config().effective_source(), None);

        r.set_source_control("https://git.example.com/fn.git");
        assert_eq!(
            r.config().effective_source(),
            Some(CodeSource::SourceControl("https://git.example.com/fn.git"))
        );
    }

    #[test]
    fn test_on_event_appends_live_trigger() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        let e = create_event("myEvent").unwrap();

        r.on_event(&e);

        let triggers = r.triggers();
        assert_eq!(triggers.len(), 1);
        assert!(triggers[0].from().ptr_eq(&e));
        assert!(triggers[0].is_to(&r));
    }

    #[test]
    fn test_uses_default_and_alias_names() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        let target = compute("ordersTable", "python3.12").unwrap();

        r.uses(&target, ["invoke"], None)
            .uses(&target, ["invoke"], Some("customAlias"))
            .uses(&target, Vec::<String>::new(), Some(""));

        let refs = r.references();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].name(), "ordersTableRef");
        assert_eq!(refs[1].name(), "customAlias");
        assert_eq!(refs[2].name(), "ordersTableRef");
        assert!(refs[0].is_from(&r));
        assert!(refs[0].to().ptr_eq(&target));
        assert!(refs[2].allow().is_empty());
    }

    #[test]
    fn test_self_reference_does_not_panic() {
        let r = compute("recursive", "nodejs20.x").unwrap();
        r.uses(&r, ["invoke"], None);
        assert_eq!(r.references()[0].name(), "recursiveRef");
    }

    #[test]
    fn test_fluent_arguments_may_read_same_resource() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        let target = compute("ordersTable", "python3.12").unwrap();
        r.uses(&target, ["read"], None);

        r.set_env("RUNTIME", r.config().runtime.clone())
            .set_description(format!("{} handler", r.config().runtime))
            .set_tag("refs", r.references().len().to_string());
        r.set_field("tags.runtime", &r.config().runtime).unwrap();
        for edge in r.references() {
            r.uses(edge.to(), ["write"], Some("writeRef"));
        }
        for edge in r.triggers() {
            r.on_event(edge.from());
        }

        let config = r.config();
        assert_eq!(config.environment["RUNTIME"], "nodejs20.x");
        assert_eq!(config.description.as_deref(), Some("nodejs20.x handler"));
        assert_eq!(config.tags["refs"], "1");
        assert_eq!(config.tags["runtime"], "nodejs20.x");
        let names: Vec<&str> = config.references.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["ordersTableRef", "writeRef"]);
    }

    #[test]
    fn test_reference_ownership() {
        let a = compute("a", "nodejs20.x").unwrap();
        let b = compute("b", "nodejs20.x").unwrap();

        a.uses(&a, ["invoke"], None);
        assert_eq!(Rc::strong_count(&a.0), 1);

        a.uses(&b, ["invoke"], None);
        b.uses(&a, ["invoke"], None);
        assert_eq!(Rc::strong_count(&a.0), 2);
        assert_eq!(Rc::strong_count(&b.0), 2);
    }

    #[test]
    fn test_config_is_a_snapshot() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        let before = r.config();
        r.set_env("TABLE", "orders");
        assert!(before.environment.is_empty());
        assert_eq!(r.config().environment["TABLE"], "orders");
    }

    #[test]
    fn test_set_field_rejects_sealed_fields() {
        let r = compute("myFunction", "nodejs20.x").unwrap();

        for field in ["id", "metadata", "instance_id", "type"] {
            let err = r.set_field(field, "other").unwrap_err();
            assert_eq!(
                err,
                BuilderError::ImmutableField {
                    field: field.to_string()
                }
            );
        }
        assert_eq!(r.id(), "myFunction");
        assert_eq!(r.kind(), ResourceKind::Compute);
    }

    #[test]
    fn test_set_field_routes_config_fields() {
        let r = compute("myFunction", "nodejs20.x").unwrap();

        r.set_field("runtime", "python3.12")
            .unwrap()
            .set_field("description", "Order handler")
            .unwrap()
            .set_field("environment.TABLE", "orders")
            .unwrap()
            .set_field("tags.owner", "checkout")
            .unwrap();

        let config = r.config();
        assert_eq!(config.runtime, "python3.12");
        assert_eq!(config.description.as_deref(), Some("Order handler"));
        assert_eq!(config.environment["TABLE"], "orders");
        assert_eq!(config.tags["owner"], "checkout");
    }

    #[test]
    fn test_set_field_errors() {
        let r = compute("myFunction", "nodejs20.x").unwrap();

        assert_eq!(
            r.set_field("runtime", "").unwrap_err(),
            BuilderError::MissingArgument { argument: "runtime" }
        );
        assert!(matches!(
            r.set_field("memory", "128"),
            Err(BuilderError::UnknownField { .. })
        ));
        assert!(matches!(
            r.set_field("environment.", "x"),
            Err(BuilderError::UnknownField { .. })
        ));
        assert_eq!(r.config().runtime, "nodejs20.x");
    }

    #[test]
    fn test_serialized_shape() {
        let r = compute("myFunction", "nodejs20.x").unwrap();
        let target = compute("ordersTable", "python3.12").unwrap();
        let e = create_event("myEvent").unwrap();
        r.set_tag("team", "checkout")
            .on_event(&e)
            .uses(&target, ["read"], None);

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["metadata"]["type"], "compute");
        assert_eq!(
            json["config"],
            serde_json::json!({
                "id": "myFunction",
                "runtime": "nodejs20.x",
                "environment": {},
                "tags": {"team": "checkout"},
                "triggers": [{"from": "myEvent", "to": "myFunction"}],
                "references": [
                    {"name": "ordersTableRef", "from": "myFunction", "to": "ordersTable", "allow": ["read"]}
                ]
            })
        );
    }
}
