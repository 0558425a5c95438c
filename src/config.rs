// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::scope::WatchScope;
use crate::sync::DependencyMatch;
use anyhow::{Context, Result};
use std::env;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespaces whose secrets and configmaps are watched, fixed for the process lifetime
    pub watch_scope: WatchScope,
    /// How `synator/reload` tokens are compared against a changed object
    pub dependency_match: DependencyMatch,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Unset or empty means every namespace
        let watch_scope = WatchScope::parse(&env::var("WATCH_NAMESPACE").unwrap_or_default());

        let dependency_match = match env::var("RELOAD_MATCH") {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .context("RELOAD_MATCH must be either 'exact' or 'substring'")?,
            _ => DependencyMatch::default(),
        };

        Ok(Config {
            watch_scope,
            dependency_match,
        })
    }
}
