// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sealed identity record shared by resources and events

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{InstanceId, ResourceKind};

/// Identity block of a resource or event
///
/// Fields are private and there are no setters: once a handle is built its
/// metadata can be read but never replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    instance_id: InstanceId,
    #[serde(rename = "type")]
    kind: ResourceKind,
    created_at: DateTime<Utc>,
}

impl Metadata {
    pub(crate) fn allocate(kind: ResourceKind) -> Self {
        Self {
            instance_id: InstanceId::new(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Field names that address the sealed identity of a resource
pub(crate) const SEALED_FIELDS: &[&str] = &[
    "id",
    "metadata",
    "instance_id",
    "instanceId",
    "kind",
    "type",
    "created_at",
];

pub(crate) fn is_sealed(field: &str) -> bool {
    SEALED_FIELDS.contains(&field)
}
