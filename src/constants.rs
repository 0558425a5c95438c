// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys used by Synator
pub mod annotations {
    /// When set to [`SYNC_ENABLED`], the secret or configmap is replicated to other namespaces
    pub const SYNC: &str = "synator/sync";
    /// The only value of [`SYNC`] that enables replication
    pub const SYNC_ENABLED: &str = "yes";
    /// Comma-separated allow-list of destination namespaces
    pub const INCLUDE_NAMESPACES: &str = "synator/include-namespaces";
    /// Comma-separated deny-list of destination namespaces, ignored when the allow-list is set
    pub const EXCLUDE_NAMESPACES: &str = "synator/exclude-namespaces";
    /// Pod template annotation listing `<kind>:<name>` dependencies of a workload
    pub const RELOAD: &str = "synator/reload";
    /// Pod template annotation holding the restart counter owned by Synator
    pub const REVISION: &str = "synator/revision";
    /// Rancher project annotation, never copied to replicas
    pub const PROJECT_ID: &str = "field.cattle.io/projectId";
}

/// The operator name used as field manager for writes
pub const OPERATOR_NAME: &str = "synator";

/// Maximum number of destination namespaces written concurrently for one sync event
pub const SYNC_CONCURRENCY: usize = 8;

/// Capacity of the channel between reconcilers and the sync manager
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
