// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource kinds Synator replicates and restarts.

pub mod syncable;
pub mod workload;

pub use syncable::{dependency_key, is_sync_enabled, object_ref, ObjectKind, SyncObject, Syncable};
pub use workload::Workload;
