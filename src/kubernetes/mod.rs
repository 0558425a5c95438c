// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes API helpers shared by the sync paths.

pub mod namespaces;

pub use namespaces::list_namespace_names;
