// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Replication of a changed source object to its destination namespaces.

use crate::error::{Result, SynatorError};
use crate::kubernetes::list_namespace_names;
use crate::sync::targets::resolve_target_namespaces;
use crate::sync::upsert::{sanitize, upsert_into_namespaces, SyncSummary};
use crate::types::{object_ref, Syncable};
use kube::{Client, Resource, ResourceExt};
use tracing::{info, instrument};

/// Copy `source` into every destination namespace its annotations resolve to.
#[instrument(skip(client, source), fields(object = %object_ref(source)))]
pub async fn sync_object<K: Syncable>(client: &Client, source: &K) -> Result<SyncSummary> {
    let Some(source_namespace) = source.namespace() else {
        return Err(SynatorError::MissingNamespace(object_ref(source)));
    };

    let candidates: Vec<String> = list_namespace_names(client)
        .await?
        .into_iter()
        .filter(|ns| *ns != source_namespace)
        .collect();

    let replica = sanitize(source);
    let targets = resolve_target_namespaces(source.meta().annotations.as_ref(), &candidates);

    if targets.is_empty() {
        info!("No destination namespaces, nothing to do");
        return Ok(SyncSummary::default());
    }

    info!("Syncing to {} namespaces", targets.len());
    let summary = upsert_into_namespaces(client, &replica, &targets).await;
    info!(
        "Sync finished: {} created, {} updated, {} failed",
        summary.created, summary.updated, summary.failed
    );

    Ok(summary)
}
