// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::annotations;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::NamespaceResourceScope;
use kube::{Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Kind of a replicated object, as written in `synator/reload` tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Secret,
    ConfigMap,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Secret => "secret",
            ObjectKind::ConfigMap => "configmap",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A namespaced key/value object that can be mirrored across namespaces
pub trait Syncable:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    const KIND: ObjectKind;

    /// Compare only the key/value payload, ignoring metadata
    fn same_payload(&self, other: &Self) -> bool;

    fn into_sync_object(self) -> SyncObject;
}

impl Syncable for Secret {
    const KIND: ObjectKind = ObjectKind::Secret;

    fn same_payload(&self, other: &Self) -> bool {
        self.data == other.data
            && self.string_data == other.string_data
            && self.type_ == other.type_
            && self.immutable == other.immutable
    }

    fn into_sync_object(self) -> SyncObject {
        SyncObject::Secret(self)
    }
}

impl Syncable for ConfigMap {
    const KIND: ObjectKind = ObjectKind::ConfigMap;

    fn same_payload(&self, other: &Self) -> bool {
        self.data == other.data
            && self.binary_data == other.binary_data
            && self.immutable == other.immutable
    }

    fn into_sync_object(self) -> SyncObject {
        SyncObject::ConfigMap(self)
    }
}

/// Either kind of syncable object, as carried on the event channel
#[derive(Debug, Clone)]
pub enum SyncObject {
    Secret(Secret),
    ConfigMap(ConfigMap),
}

/// Check if an object has the sync annotation set to the enabling value
pub fn is_sync_enabled<K: Resource>(object: &K) -> bool {
    object
        .meta()
        .annotations
        .as_ref()
        .and_then(|a| a.get(annotations::SYNC))
        .is_some_and(|v| v == annotations::SYNC_ENABLED)
}

/// Build the `<kind>:<name>` token workloads use to declare a dependency on `object`
pub fn dependency_key<K: Syncable>(object: &K) -> String {
    format!("{}:{}", K::KIND, object.name_any())
}

/// `<kind>:<namespace>/<name>` of an object, for log messages
pub fn object_ref<K: Syncable>(object: &K) -> String {
    format!(
        "{}:{}/{}",
        K::KIND,
        object.namespace().unwrap_or_default(),
        object.name_any()
    )
}
