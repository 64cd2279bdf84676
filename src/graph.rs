// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource graph view for downstream consumers
//!
//! Walks the connections reachable from a set of root resources and builds a
//! petgraph directed graph of resources and events. Edges point from a
//! prerequisite to its dependant:
//!
//! - trigger: event → destination resource
//! - reference: target → source resource (the source needs its target first)
//!
//! A resource referencing itself adds no edge; it has no ordering constraint
//! against itself.

use petgraph::algo::toposort;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::domain::{Event, InstanceId, Resource, ResourceKind};
use crate::errors::{BuilderError, BuilderResult};

/// Node of the resource graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GraphNode {
    Resource(Resource),
    Event(Event),
}

impl GraphNode {
    pub fn instance_id(&self) -> InstanceId {
        match self {
            Self::Resource(r) => r.metadata().instance_id(),
            Self::Event(e) => e.metadata().instance_id(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Resource(r) => r.kind(),
            Self::Event(e) => e.metadata().kind(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Resource(r) => r.id(),
            Self::Event(e) => e.name(),
        }
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().as_str(), self.label())
    }
}

/// Edge of the resource graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphEdge {
    Trigger,
    Reference { name: String, allow: Vec<String> },
}

impl fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger => write!(f, "trigger"),
            Self::Reference { name, allow } => write!(f, "{} [{}]", name, allow.join(", ")),
        }
    }
}

#[derive(Serialize)]
struct EdgeView<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(flatten)]
    edge: &'a GraphEdge,
}

#[derive(Serialize)]
struct GraphView<'a> {
    nodes: Vec<&'a GraphNode>,
    edges: Vec<EdgeView<'a>>,
}

/// Directed graph of declared resources and events
pub struct ResourceGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
    node_indices: HashMap<InstanceId, NodeIndex>,
}

impl ResourceGraph {
    /// Collect every resource and event reachable from `roots`
    pub fn from_roots(roots: &[Resource]) -> Self {
        let mut this = Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
        };

        let mut visited: HashSet<InstanceId> = HashSet::new();
        let mut pending: Vec<Resource> = roots.to_vec();
        while let Some(resource) = pending.pop() {
            if !visited.insert(resource.metadata().instance_id()) {
                continue;
            }
            let index = this.insert(GraphNode::Resource(resource.clone()));

            for edge in resource.triggers() {
                let event = this.insert(GraphNode::Event(edge.from().clone()));
                this.graph.update_edge(event, index, GraphEdge::Trigger);
            }

            for edge in resource.references() {
                let target = edge.to().clone();
                let target_index = this.insert(GraphNode::Resource(target.clone()));
                if target_index == index {
                    continue;
                }
                if !visited.contains(&target.metadata().instance_id()) {
                    pending.push(target);
                }
                this.graph.add_edge(
                    target_index,
                    index,
                    GraphEdge::Reference {
                        name: edge.name().to_string(),
                        allow: edge.allow().to_vec(),
                    },
                );
            }
        }

        tracing::debug!(
            "Collected resource graph with {} nodes and {} edges",
            this.node_count(),
            this.edge_count()
        );
        this
    }

    /// Insert a node unless already present
    fn insert(&mut self, node: GraphNode) -> NodeIndex {
        let id = node.instance_id();
        if let Some(&index) = self.node_indices.get(&id) {
            return index;
        }
        let index = self.graph.add_node(node);
        self.node_indices.insert(id, index);
        index
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.node_indices.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |i| &self.graph[i])
    }

    /// Nodes that must exist before `resource`: its trigger events and reference targets
    pub fn dependencies_of(&self, resource: &Resource) -> Vec<&GraphNode> {
        let Some(&index) = self.node_indices.get(&resource.metadata().instance_id()) else {
            return Vec::new();
        };
        let mut deps: Vec<&GraphNode> = self
            .graph
            .neighbors_directed(index, Direction::Incoming)
            .map(|n| &self.graph[n])
            .collect();
        deps.sort_by(|a, b| a.label().cmp(b.label()));
        deps.dedup_by(|a, b| a.instance_id() == b.instance_id());
        deps
    }

    /// Order in which a consumer can materialize the nodes
    ///
    /// Every event and reference target precedes the resources depending on it.
    ///
    /// # Errors
    /// [`BuilderError::CyclicReference`] if references form a cycle.
    pub fn deployment_order(&self) -> BuilderResult<Vec<&GraphNode>> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|n| &self.graph[n]).collect())
            .map_err(|cycle| BuilderError::CyclicReference {
                label: self.graph[cycle.node_id()].label().to_string(),
            })
    }

    /// Graphviz rendering for debugging
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    /// JSON snapshot of nodes and edges for an external consumer
    pub fn to_json(&self) -> BuilderResult<String> {
        let view = GraphView {
            nodes: self.nodes().collect(),
            edges: self
                .graph
                .edge_indices()
                .filter_map(|e| {
                    let (from, to) = self.graph.edge_endpoints(e)?;
                    Some(EdgeView {
                        from: self.graph[from].label(),
                        to: self.graph[to].label(),
                        edge: &self.graph[e],
                    })
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

impl fmt::Debug for ResourceGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
