// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Destination namespace resolution from include/exclude annotations.

use crate::constants::annotations;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Split a comma-separated annotation value into trimmed, non-empty tokens
pub fn parse_namespace_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|ns| !ns.is_empty())
        .collect()
}

/// Outcome of resolving include/exclude annotations against candidate namespaces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Destination namespaces
    pub targets: BTreeSet<String>,
    /// Annotation tokens naming namespaces that are not candidates
    pub unknown: Vec<String>,
    /// The annotation that was present but held no namespace names
    pub empty_annotation: Option<&'static str>,
    /// The annotation the unknown tokens came from
    pub source_annotation: Option<&'static str>,
}

impl Resolution {
    /// Log configuration mistakes found while resolving
    pub fn warn(&self) {
        if let Some(annotation) = self.empty_annotation {
            warn!("{} was specified, but no values were parsed", annotation);
        }
        if let Some(annotation) = self.source_annotation {
            for ns in &self.unknown {
                warn!(
                    "{} names namespace '{}', which does not exist on the cluster",
                    annotation, ns
                );
            }
        }
    }
}

/// Resolve destinations without logging.
///
/// `candidates` must already exclude the source namespace. An include-list
/// takes precedence over an exclude-list; without either every candidate is
/// a destination.
pub fn resolve(
    object_annotations: Option<&BTreeMap<String, String>>,
    candidates: &[String],
) -> Resolution {
    let include = object_annotations.and_then(|a| a.get(annotations::INCLUDE_NAMESPACES));
    let exclude = object_annotations.and_then(|a| a.get(annotations::EXCLUDE_NAMESPACES));

    let mut resolution = Resolution::default();

    if let Some(include) = include {
        let tokens = parse_namespace_list(include);
        if tokens.is_empty() {
            resolution.empty_annotation = Some(annotations::INCLUDE_NAMESPACES);
        }
        resolution.source_annotation = Some(annotations::INCLUDE_NAMESPACES);

        for ns in tokens {
            if candidates.iter().any(|c| c == ns) {
                resolution.targets.insert(ns.to_string());
            } else {
                resolution.unknown.push(ns.to_string());
            }
        }
        return resolution;
    }

    resolution.targets = candidates.iter().cloned().collect();

    if let Some(exclude) = exclude {
        let tokens = parse_namespace_list(exclude);
        if tokens.is_empty() {
            resolution.empty_annotation = Some(annotations::EXCLUDE_NAMESPACES);
        }
        resolution.source_annotation = Some(annotations::EXCLUDE_NAMESPACES);

        for ns in tokens {
            if !resolution.targets.remove(ns) {
                resolution.unknown.push(ns.to_string());
            }
        }
    }

    resolution
}

/// Resolve the namespaces an object should be copied to, logging a warning
/// for every annotation token that names a namespace which is not a candidate.
pub fn resolve_target_namespaces(
    object_annotations: Option<&BTreeMap<String, String>>,
    candidates: &[String],
) -> BTreeSet<String> {
    let resolution = resolve(object_annotations, candidates);
    resolution.warn();
    resolution.targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaces(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn annotations_with(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_namespace_list_strips_whitespace() {
        assert_eq!(parse_namespace_list(" a , b,c ,, "), vec!["a", "b", "c"]);
        assert!(parse_namespace_list(" , ").is_empty());
    }

    #[test]
    fn test_no_annotations_targets_all_candidates() {
        let candidates = namespaces(&["team-b", "team-c"]);
        assert_eq!(resolve_target_namespaces(None, &candidates), set(&["team-b", "team-c"]));

        let unrelated = annotations_with(&[("other", "x")]);
        assert_eq!(
            resolve_target_namespaces(Some(&unrelated), &candidates),
            set(&["team-b", "team-c"])
        );
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let candidates = namespaces(&["b", "c", "d"]);
        let annotations = annotations_with(&[(annotations::EXCLUDE_NAMESPACES, "c")]);
        let first = resolve_target_namespaces(Some(&annotations), &candidates);
        let second = resolve_target_namespaces(Some(&annotations), &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_include_is_intersection_with_candidates() {
        let candidates = namespaces(&["team-b", "team-c", "team-d"]);
        let annotations = annotations_with(&[(
            annotations::INCLUDE_NAMESPACES,
            " missing ,team-c,  team-b, bogus",
        )]);

        assert_eq!(
            resolve_target_namespaces(Some(&annotations), &candidates),
            set(&["team-b", "team-c"])
        );
    }

    #[test]
    fn test_include_ignores_exclude() {
        let candidates = namespaces(&["team-b", "team-c"]);
        let annotations = annotations_with(&[
            (annotations::INCLUDE_NAMESPACES, "team-b"),
            (annotations::EXCLUDE_NAMESPACES, "team-b"),
        ]);

        assert_eq!(resolve_target_namespaces(Some(&annotations), &candidates), set(&["team-b"]));
    }

    #[test]
    fn test_include_empty_targets_nothing() {
        let candidates = namespaces(&["team-b"]);
        let annotations = annotations_with(&[(annotations::INCLUDE_NAMESPACES, "")]);
        assert!(resolve_target_namespaces(Some(&annotations), &candidates).is_empty());
    }

    #[test]
    fn test_include_source_namespace_is_not_a_candidate() {
        // The caller removed team-a, so asking for it is a no-op
        let candidates = namespaces(&["team-b"]);
        let annotations = annotations_with(&[(annotations::INCLUDE_NAMESPACES, "team-a,team-b")]);
        assert_eq!(resolve_target_namespaces(Some(&annotations), &candidates), set(&["team-b"]));
    }

    #[test]
    fn test_exclude_removes_from_candidates() {
        let candidates = namespaces(&["team-b", "team-c", "team-d"]);
        let annotations = annotations_with(&[(annotations::EXCLUDE_NAMESPACES, "team-d, nope")]);

        assert_eq!(
            resolve_target_namespaces(Some(&annotations), &candidates),
            set(&["team-b", "team-c"])
        );
    }

    #[test]
    fn test_exclude_without_tokens_changes_nothing() {
        let candidates = namespaces(&["team-b", "team-c"]);
        let annotations = annotations_with(&[(annotations::EXCLUDE_NAMESPACES, " , ")]);

        assert_eq!(
            resolve_target_namespaces(Some(&annotations), &candidates),
            set(&["team-b", "team-c"])
        );
    }

    #[test]
    fn test_empty_candidates_yield_empty_result() {
        let include = annotations_with(&[(annotations::INCLUDE_NAMESPACES, "a,b")]);
        let exclude = annotations_with(&[(annotations::EXCLUDE_NAMESPACES, "a")]);

        assert!(resolve_target_namespaces(None, &[]).is_empty());
        assert!(resolve_target_namespaces(Some(&include), &[]).is_empty());
        assert!(resolve_target_namespaces(Some(&exclude), &[]).is_empty());
    }

    #[test]
    fn test_resolve_reports_unknown_tokens() {
        let candidates = namespaces(&["team-b"]);
        let include = annotations_with(&[(annotations::INCLUDE_NAMESPACES, "team-b,ghost")]);
        let resolution = resolve(Some(&include), &candidates);
        assert_eq!(resolution.unknown, vec!["ghost".to_string()]);
        assert_eq!(resolution.source_annotation, Some(annotations::INCLUDE_NAMESPACES));
        assert_eq!(resolution.empty_annotation, None);

        let exclude = annotations_with(&[(annotations::EXCLUDE_NAMESPACES, "")]);
        let resolution = resolve(Some(&exclude), &candidates);
        assert!(resolution.unknown.is_empty());
        assert_eq!(resolution.empty_annotation, Some(annotations::EXCLUDE_NAMESPACES));
    }
}
