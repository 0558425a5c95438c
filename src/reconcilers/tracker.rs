// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Turns raw watcher events into created / updated / deleted changes.

use crate::types::Syncable;
use kube::runtime::watcher::Event;
use kube::{Resource, ResourceExt};
use std::collections::{HashMap, HashSet};

/// A classified change to a watched object
#[derive(Debug, Clone, PartialEq)]
pub enum Change<K> {
    Created(K),
    Updated { old: K, new: K },
    Deleted(K),
}

/// Remembers the last seen state of every watched object so that watcher
/// events can be told apart into creates and real updates. Resyncs and
/// relists that carry no observable change produce nothing.
pub struct ObjectTracker<K> {
    seen: HashMap<String, K>,
    /// Keys delivered by the relist in progress
    relist: Option<HashSet<String>>,
    initialized: bool,
    /// Report objects of the very first listing as created
    replay_initial: bool,
    changed: fn(&K, &K) -> bool,
}

impl<K: Resource + Clone> ObjectTracker<K> {
    pub fn new(replay_initial: bool, changed: fn(&K, &K) -> bool) -> Self {
        Self {
            seen: HashMap::new(),
            relist: None,
            initialized: false,
            replay_initial,
            changed,
        }
    }

    pub fn observe(&mut self, event: Event<K>) -> Vec<Change<K>> {
        match event {
            Event::Init => {
                self.relist = Some(HashSet::new());
                Vec::new()
            }
            Event::InitApply(object) => {
                let key = key_of(&object);
                if let Some(relist) = self.relist.as_mut() {
                    relist.insert(key.clone());
                }
                let report_new = self.initialized || self.replay_initial;
                self.apply(key, object, report_new).into_iter().collect()
            }
            Event::InitDone => {
                let mut changes = Vec::new();
                if let Some(present) = self.relist.take() {
                    // Deleted while the watch was down
                    let gone: Vec<String> = self
                        .seen
                        .keys()
                        .filter(|k| !present.contains(*k))
                        .cloned()
                        .collect();
                    for key in gone {
                        if let Some(object) = self.seen.remove(&key) {
                            changes.push(Change::Deleted(object));
                        }
                    }
                }
                self.initialized = true;
                changes
            }
            Event::Apply(object) => {
                let key = key_of(&object);
                self.apply(key, object, true).into_iter().collect()
            }
            Event::Delete(object) => {
                self.seen.remove(&key_of(&object));
                vec![Change::Deleted(object)]
            }
        }
    }

    fn apply(&mut self, key: String, object: K, report_new: bool) -> Option<Change<K>> {
        match self.seen.insert(key, object.clone()) {
            None => report_new.then_some(Change::Created(object)),
            Some(old) if (self.changed)(&old, &object) => Some(Change::Updated { old, new: object }),
            Some(_) => None,
        }
    }
}

fn key_of<K: Resource>(object: &K) -> String {
    format!("{}/{}", object.namespace().unwrap_or_default(), object.name_any())
}

/// Whether a secret or configmap changed in a way users can observe:
/// payload, labels or annotations
pub fn state_changed<K: Syncable>(old: &K, new: &K) -> bool {
    !old.same_payload(new) || old.labels() != new.labels() || old.annotations() != new.annotations()
}
