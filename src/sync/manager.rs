// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Central coordinator that routes watch events to the sync paths.

use crate::config::Config;
use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::sync::{backfill_namespace, reload_dependents, sync_object};
use crate::types::{is_sync_enabled, object_ref, SyncObject, Syncable};
use kube::Client;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Events that reconcilers send to the SyncManager
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A secret or configmap appeared in a watched namespace
    ObjectCreated { object: SyncObject },
    /// A secret or configmap in a watched namespace changed
    ObjectUpdated { object: SyncObject },
    /// A namespace was created
    NamespaceCreated { name: String },
}

/// Receives events from reconcilers and performs the actual sync work,
/// one event at a time.
pub struct SyncManager {
    client: Client,
    config: Config,
    event_rx: mpsc::Receiver<SyncEvent>,
}

/// Handle to send events to the SyncManager
#[derive(Clone)]
pub struct SyncManagerHandle {
    event_tx: mpsc::Sender<SyncEvent>,
}

impl SyncManagerHandle {
    /// A handle whose events are delivered to the returned receiver instead of a manager
    #[cfg(test)]
    pub fn channel() -> (Self, mpsc::Receiver<SyncEvent>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (Self { event_tx }, event_rx)
    }

    pub async fn send(&self, event: SyncEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("Failed to send event to SyncManager: {}", e);
        }
    }
}

impl SyncManager {
    pub fn new(client: Client, config: Config) -> (Self, SyncManagerHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let manager = Self {
            client,
            config,
            event_rx,
        };

        let handle = SyncManagerHandle { event_tx };
        (manager, handle)
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("SyncManager started, listening for events...");

        while let Some(event) = self.event_rx.recv().await {
            self.handle_event(event).await;
        }

        info!("All event senders closed, SyncManager stopping");
        Ok(())
    }

    pub async fn handle_event(&self, event: SyncEvent) {
        debug!("Handling event: {:?}", event);

        match event {
            SyncEvent::ObjectCreated { object } => match object {
                SyncObject::Secret(s) => self.handle_object(&s, false).await,
                SyncObject::ConfigMap(c) => self.handle_object(&c, false).await,
            },
            SyncEvent::ObjectUpdated { object } => match object {
                SyncObject::Secret(s) => self.handle_object(&s, true).await,
                SyncObject::ConfigMap(c) => self.handle_object(&c, true).await,
            },
            SyncEvent::NamespaceCreated { name } => {
                self.handle_namespace_created(&name).await;
            }
        }
    }

    async fn handle_object<K: Syncable>(&self, object: &K, updated: bool) {
        if is_sync_enabled(object) {
            if let Err(e) = sync_object(&self.client, object).await {
                error!("Failed to sync {}: {}", object_ref(object), e);
            }
        }

        // Restarts follow any update, flagged or not
        if updated {
            if let Err(e) =
                reload_dependents(&self.client, object, self.config.dependency_match).await
            {
                error!(
                    "Failed to restart workloads depending on {}: {}",
                    object_ref(object),
                    e
                );
            }
        }
    }

    #[instrument(skip(self))]
    async fn handle_namespace_created(&self, name: &str) {
        info!("Namespace created, backfilling flagged objects");

        if let Err(e) = backfill_namespace(&self.client, name).await {
            error!("Failed to backfill namespace {}: {}", name, e);
        }
    }
}
