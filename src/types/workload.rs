// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::NamespaceResourceScope;
use kube::Resource;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;

/// A pod-template based workload that rolls when its template annotations change
pub trait Workload:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + fmt::Debug
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Annotations on the pod template, not on the workload itself
    fn template_annotations(&self) -> Option<&BTreeMap<String, String>>;
}

macro_rules! impl_workload {
    ($($kind:ty),+) => {
        $(
            impl Workload for $kind {
                fn template_annotations(&self) -> Option<&BTreeMap<String, String>> {
                    self.spec
                        .as_ref()?
                        .template
                        .metadata
                        .as_ref()?
                        .annotations
                        .as_ref()
                }
            }
        )+
    };
}

impl_workload!(Deployment, StatefulSet, DaemonSet);
