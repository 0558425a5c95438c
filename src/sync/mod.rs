// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret and configmap replication, namespace backfill and dependent restarts.

pub mod backfill;
pub mod manager;
pub mod reload;
pub mod replicate;
pub mod targets;
pub mod upsert;

pub use backfill::backfill_namespace;
pub use manager::{SyncEvent, SyncManager, SyncManagerHandle};
pub use reload::{reload_dependents, DependencyMatch};
pub use replicate::sync_object;
pub use targets::resolve_target_namespaces;
pub use upsert::{sanitize, upsert_replica, SyncSummary, UpsertOutcome};
