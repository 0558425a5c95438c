// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Replays flagged objects into a namespace that was just created.

use crate::error::Result;
use crate::sync::targets::resolve;
use crate::sync::upsert::{sanitize, upsert_into_namespaces, SyncSummary};
use crate::types::{is_sync_enabled, Syncable};
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::{api::ListParams, Api, Client, Resource, ResourceExt};
use tracing::{debug, info, instrument};

/// Copy every flagged secret and configmap in the cluster into `namespace`,
/// as far as their include/exclude annotations allow it.
#[instrument(skip(client))]
pub async fn backfill_namespace(client: &Client, namespace: &str) -> Result<SyncSummary> {
    let mut summary = backfill_kind::<Secret>(client, namespace).await?;
    summary += backfill_kind::<ConfigMap>(client, namespace).await?;

    info!(
        "Backfill finished: {} created, {} updated, {} failed",
        summary.created, summary.updated, summary.failed
    );
    Ok(summary)
}

async fn backfill_kind<K: Syncable>(client: &Client, namespace: &str) -> Result<SyncSummary> {
    let api: Api<K> = Api::all(client.clone());
    let objects = api.list(&ListParams::default()).await?;
    let candidates = vec![namespace.to_string()];

    let mut summary = SyncSummary::default();
    for object in objects.items.iter().filter(|o| is_sync_enabled(*o)) {
        if object.namespace().as_deref() == Some(namespace) {
            continue;
        }

        // Tokens naming other namespaces are expected here, so no warnings
        let targets = resolve(object.meta().annotations.as_ref(), &candidates).targets;
        if targets.is_empty() {
            debug!(
                "{} {}/{} does not target {}",
                K::KIND,
                object.namespace().unwrap_or_default(),
                object.name_any(),
                namespace
            );
            continue;
        }

        let replica = sanitize(object);
        summary += upsert_into_namespaces(client, &replica, &targets).await;
    }

    Ok(summary)
}
