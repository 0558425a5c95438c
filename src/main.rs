// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::Client;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use synator::config::Config;
use synator::reconcilers::{NamespaceReconciler, ObjectReconciler};
use synator::sync::SyncManager;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Synator operator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: watch_scope={}, dependency_match={}",
        config.watch_scope, config.dependency_match
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Create the sync manager and get a handle for reconcilers
    let (sync_manager, sync_handle) = SyncManager::new(client.clone(), config.clone());

    let secret_reconciler: ObjectReconciler<Secret> =
        ObjectReconciler::new(client.clone(), config.watch_scope.clone(), sync_handle.clone());
    let config_map_reconciler: ObjectReconciler<ConfigMap> =
        ObjectReconciler::new(client.clone(), config.watch_scope.clone(), sync_handle.clone());
    let namespace_reconciler = NamespaceReconciler::new(client, sync_handle);

    info!("Starting reconcilers...");

    tokio::try_join!(
        sync_manager.run(),
        secret_reconciler.run(),
        config_map_reconciler.run(),
        namespace_reconciler.run()
    )?;

    // Reconcilers only return when their watch streams end
    warn!("All reconcilers stopped unexpectedly");
    Ok(())
}
