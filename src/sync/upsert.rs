// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Replica sanitizing and create-or-update into destination namespaces

use crate::constants::{annotations, OPERATOR_NAME, SYNC_CONCURRENCY};
use crate::error::Result;
use crate::types::Syncable;
use futures::{stream, StreamExt};
use kube::{
    api::{ObjectMeta, Patch, PatchParams},
    Api, Client, Resource, ResourceExt,
};
use std::collections::BTreeSet;
use std::ops::AddAssign;
use tracing::{debug, error, info, instrument};

/// What happened to a replica in one destination namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Per-event counters over all destination namespaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

impl AddAssign for SyncSummary {
    fn add_assign(&mut self, other: Self) {
        self.created += other.created;
        self.updated += other.updated;
        self.failed += other.failed;
    }
}

/// Build the replica of `source`: same name, labels and payload, without the
/// sync and project annotations and without any server-populated metadata.
pub fn sanitize<K: Syncable>(source: &K) -> K {
    let metadata = source.meta();
    let filtered_annotations = metadata.annotations.as_ref().map(|a| {
        a.iter()
            .filter(|(k, _)| k.as_str() != annotations::SYNC && k.as_str() != annotations::PROJECT_ID)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    });

    let mut replica = source.clone();
    *replica.meta_mut() = ObjectMeta {
        name: metadata.name.clone(),
        labels: metadata.labels.clone(),
        annotations: filtered_annotations,
        ..Default::default()
    };
    replica
}

/// Create or update `replica` in `namespace`.
///
/// Both branches server-side apply as `synator`, so every key of a replica is
/// owned by a single apply manager and keys dropped from the source are pruned.
/// The read only decides which outcome is reported. The read and the write are
/// separate calls, so a concurrent change in between is not detected.
#[instrument(skip(client, replica), fields(object = %format!("{}:{}", K::KIND, replica.name_any())))]
pub async fn upsert_replica<K: Syncable>(
    client: &Client,
    replica: &K,
    namespace: &str,
) -> Result<UpsertOutcome> {
    let name = replica.name_any();
    let api: Api<K> = Api::namespaced(client.clone(), namespace);

    let mut desired = replica.clone();
    desired.meta_mut().namespace = Some(namespace.to_string());

    let outcome = match api.get(&name).await {
        Ok(_) => {
            debug!("Replica exists in {}, applying", namespace);
            UpsertOutcome::Updated
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("Replica missing in {}, creating", namespace);
            UpsertOutcome::Created
        }
        Err(e) => return Err(e.into()),
    };

    let pp = PatchParams::apply(OPERATOR_NAME).force();
    api.patch(&name, &pp, &Patch::Apply(&desired)).await?;
    Ok(outcome)
}

/// Upsert `replica` into every namespace in `namespaces`. Namespaces are
/// independent: a failure is logged and counted, the others still proceed.
pub async fn upsert_into_namespaces<K: Syncable>(
    client: &Client,
    replica: &K,
    namespaces: &BTreeSet<String>,
) -> SyncSummary {
    let name = replica.name_any();
    let results: Vec<(&String, Result<UpsertOutcome>)> = stream::iter(namespaces)
        .map(|ns| async move { (ns, upsert_replica(client, replica, ns).await) })
        .buffer_unordered(SYNC_CONCURRENCY)
        .collect()
        .await;

    let mut summary = SyncSummary::default();
    for (ns, result) in results {
        match result {
            Ok(UpsertOutcome::Created) => {
                info!("Created {} {}/{}", K::KIND, ns, name);
                summary.created += 1;
            }
            Ok(UpsertOutcome::Updated) => {
                info!("Updated {} {}/{}", K::KIND, ns, name);
                summary.updated += 1;
            }
            Err(e) => {
                error!("Failed to sync {} {} to namespace {}: {}", K::KIND, name, ns, e);
                summary.failed += 1;
            }
        }
    }
    summary
}
