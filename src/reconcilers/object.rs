// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object reconciler - watches Secrets or ConfigMaps and notifies the sync manager.

use crate::reconcilers::tracker::{state_changed, Change, ObjectTracker};
use crate::scope::WatchScope;
use crate::sync::{SyncEvent, SyncManagerHandle};
use crate::types::{object_ref, Syncable};
use futures::StreamExt;
use kube::{Api, Client, ResourceExt};
use kube_runtime::{watcher, WatchStreamExt};
use std::marker::PhantomData;
use tracing::{debug, info, warn};

pub struct ObjectReconciler<K> {
    client: Client,
    scope: WatchScope,
    sync_handle: SyncManagerHandle,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Syncable> ObjectReconciler<K> {
    pub fn new(client: Client, scope: WatchScope, sync_handle: SyncManagerHandle) -> Self {
        Self {
            client,
            scope,
            sync_handle,
            _kind: PhantomData,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let objects: Api<K> = Api::all(self.client.clone());
        // Objects present at startup are replayed so they get an initial sync
        let mut tracker = ObjectTracker::new(true, state_changed::<K>);

        info!("Watching {} objects in {}", K::KIND, self.scope);

        let stream = watcher(objects, watcher::Config::default()).default_backoff();
        tokio::pin!(stream);

        while let Some(event) = stream.next().await {
            match event {
                Ok(event) => {
                    for change in tracker.observe(event) {
                        self.dispatch(change).await;
                    }
                }
                Err(e) => warn!("{} watch error: {}", K::KIND, e),
            }
        }

        warn!("{} watch stream ended", K::KIND);
        Ok(())
    }

    async fn dispatch(&self, change: Change<K>) {
        let (object, updated) = match change {
            Change::Created(object) => (object, false),
            Change::Updated { old, new } => {
                debug!(
                    "{} changed (payload changed: {})",
                    object_ref(&new),
                    !old.same_payload(&new)
                );
                (new, true)
            }
            Change::Deleted(object) => {
                debug!("{} deleted, replicas are left in place", object_ref(&object));
                return;
            }
        };

        let namespace = object.namespace().unwrap_or_default();
        if !self.scope.allows(&namespace) {
            debug!("{} is outside the watch scope, skipping", object_ref(&object));
            return;
        }

        let object = object.into_sync_object();
        let event = if updated {
            SyncEvent::ObjectUpdated { object }
        } else {
            SyncEvent::ObjectCreated { object }
        };
        self.sync_handle.send(event).await;
    }
}
