// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace scope of the secret and configmap watchers.

use std::collections::BTreeSet;
use std::fmt;

/// Which namespaces the operator reacts to. Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WatchScope {
    #[default]
    All,
    Namespaces(BTreeSet<String>),
}

impl WatchScope {
    /// Parse a comma-separated namespace list, an empty value meaning all namespaces
    pub fn parse(value: &str) -> Self {
        let namespaces: BTreeSet<String> = value
            .split(',')
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .map(str::to_string)
            .collect();

        if namespaces.is_empty() {
            WatchScope::All
        } else {
            WatchScope::Namespaces(namespaces)
        }
    }

    /// Whether events from `namespace` should be handled
    pub fn allows(&self, namespace: &str) -> bool {
        match self {
            WatchScope::All => true,
            WatchScope::Namespaces(namespaces) => namespaces.contains(namespace),
        }
    }
}

impl fmt::Display for WatchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchScope::All => write!(f, "<all namespaces>"),
            WatchScope::Namespaces(namespaces) => {
                let list: Vec<&str> = namespaces.iter().map(String::as_str).collect();
                write!(f, "{}", list.join(","))
            }
        }
    }
}
