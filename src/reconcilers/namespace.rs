// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace reconciler - reports newly created namespaces to the sync manager.

use crate::reconcilers::tracker::{Change, ObjectTracker};
use crate::sync::{SyncEvent, SyncManagerHandle};
use futures::StreamExt;
use k8s_openapi::api::core::v1::Namespace;
use kube::{Api, Client, ResourceExt};
use kube_runtime::{watcher, WatchStreamExt};
use tracing::{debug, info, warn};

pub struct NamespaceReconciler {
    client: Client,
    sync_handle: SyncManagerHandle,
}

impl NamespaceReconciler {
    pub fn new(client: Client, sync_handle: SyncManagerHandle) -> Self {
        Self { client, sync_handle }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        // Existing namespaces are covered by the initial object sync
        let mut tracker: ObjectTracker<Namespace> = ObjectTracker::new(false, |_, _| false);

        info!("Watching namespaces");

        let stream = watcher(namespaces, watcher::Config::default()).default_backoff();
        tokio::pin!(stream);

        while let Some(event) = stream.next().await {
            match event {
                Ok(event) => {
                    for change in tracker.observe(event) {
                        if let Change::Created(ns) = change {
                            let name = ns.name_any();
                            debug!("Namespace {} created", name);
                            self.sync_handle
                                .send(SyncEvent::NamespaceCreated { name })
                                .await;
                        }
                    }
                }
                Err(e) => warn!("Namespace watch error: {}", e),
            }
        }

        warn!("Namespace watch stream ended");
        Ok(())
    }
}
