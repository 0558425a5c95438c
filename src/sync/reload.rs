// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rolling restarts of workloads that depend on a changed secret or configmap.

use crate::constants::{annotations, OPERATOR_NAME};
use crate::error::{Result, SynatorError};
use crate::types::{dependency_key, Syncable, Workload};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use kube::{
    api::{ListParams, Patch, PatchParams},
    Api, Client, Resource, ResourceExt,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// How `synator/reload` tokens are compared against a dependency key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyMatch {
    /// The token must equal the key
    #[default]
    Exact,
    /// The token only has to contain the key, so `configmap:app` also matches `configmap:app-2`
    Substring,
}

impl FromStr for DependencyMatch {
    type Err = SynatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(DependencyMatch::Exact),
            "substring" => Ok(DependencyMatch::Substring),
            other => Err(SynatorError::InvalidConfig(format!(
                "unknown dependency match mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for DependencyMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyMatch::Exact => f.write_str("exact"),
            DependencyMatch::Substring => f.write_str("substring"),
        }
    }
}

/// Whether pod template annotations declare a dependency on `key`
pub fn depends_on(
    template_annotations: Option<&BTreeMap<String, String>>,
    key: &str,
    mode: DependencyMatch,
) -> bool {
    let Some(reload) = template_annotations.and_then(|a| a.get(annotations::RELOAD)) else {
        return false;
    };

    reload.split(',').map(str::trim).any(|token| match mode {
        DependencyMatch::Exact => token == key,
        DependencyMatch::Substring => token.contains(key),
    })
}

/// Revision to write on the next restart. A missing or unparsable counter counts as 0.
pub fn next_revision(template_annotations: Option<&BTreeMap<String, String>>) -> u64 {
    template_annotations
        .and_then(|a| a.get(annotations::REVISION))
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0)
        .saturating_add(1)
}

/// Restart every workload in the object's namespace that lists it in `synator/reload`.
///
/// Returns the restarted workloads as `<kind>/<name>`. The first list or
/// patch failure aborts the scan.
#[instrument(
    skip(client, object),
    fields(dependency = %dependency_key(object), namespace = %object.namespace().unwrap_or_default())
)]
pub async fn reload_dependents<K: Syncable>(
    client: &Client,
    object: &K,
    mode: DependencyMatch,
) -> Result<Vec<String>> {
    let Some(namespace) = object.namespace() else {
        return Err(SynatorError::MissingNamespace(dependency_key(object)));
    };
    let key = dependency_key(object);

    let mut restarted = Vec::new();
    restarted.extend(restart_matching::<Deployment>(client, &namespace, &key, mode).await?);
    restarted.extend(restart_matching::<StatefulSet>(client, &namespace, &key, mode).await?);
    restarted.extend(restart_matching::<DaemonSet>(client, &namespace, &key, mode).await?);

    if restarted.is_empty() {
        debug!("No workloads depend on {}", key);
    }
    Ok(restarted)
}

async fn restart_matching<W: Workload>(
    client: &Client,
    namespace: &str,
    key: &str,
    mode: DependencyMatch,
) -> Result<Vec<String>> {
    let api: Api<W> = Api::namespaced(client.clone(), namespace);
    let workloads = api.list(&ListParams::default()).await?;
    let kind = W::kind(&());

    debug!("Checking {} {} workloads in {}", workloads.items.len(), kind, namespace);

    let mut restarted = Vec::new();
    for workload in workloads
        .items
        .iter()
        .filter(|w| depends_on(w.template_annotations(), key, mode))
    {
        let name = workload.name_any();
        let revision = next_revision(workload.template_annotations());

        let patch = json!({
            "spec": {
                "template": {
                    "metadata": {
                        "annotations": {
                            (annotations::REVISION): revision.to_string()
                        }
                    }
                }
            }
        });
        let pp = PatchParams {
            field_manager: Some(OPERATOR_NAME.to_string()),
            ..Default::default()
        };
        api.patch(&name, &pp, &Patch::Merge(&patch)).await?;

        info!("{} {}/{} updated to revision {}", kind, namespace, name, revision);
        restarted.push(format!("{}/{}", kind, name));
    }

    Ok(restarted)
}
