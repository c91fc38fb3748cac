//! Keyed enter/update/exit reconciliation of scene nodes against a data
//! collection.
//!
//! Every place the plot binds data to primitives (tick markers, grid lines,
//! data markers) goes through [`reconcile`], parameterized by a [`Binding`]
//! that knows how to extract a key, build a node, apply attributes and tear a
//! node down.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::graph::NodeId;
use super::stage::Stage;

/// How items of type `T` are bound to scene nodes.
pub trait Binding<T> {
    type Key: Clone + Eq + Hash + std::fmt::Debug;

    fn key(&self, item: &T) -> Self::Key;

    /// Build the node subtree for a new item and return its root.
    fn enter(&self, stage: &mut Stage, item: &T) -> NodeId;

    /// Apply the item's attributes. Runs for entered and retained items.
    fn update(&self, stage: &mut Stage, node: NodeId, item: &T);

    /// Tear down the node of an item that disappeared.
    fn exit(&self, stage: &mut Stage, node: NodeId) {
        stage.remove(node);
    }
}

/// Nodes currently bound to keys, in the order of the last reconciled items.
#[derive(Debug, Clone)]
pub struct KeyedNodes<K> {
    entries: Vec<(K, NodeId)>,
}

impl<K> Default for KeyedNodes<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> KeyedNodes<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, n)| *n)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, NodeId)> + '_ {
        self.entries.iter().map(|(k, n)| (k, *n))
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileReport<K> {
    pub entered: Vec<K>,
    pub updated: Vec<K>,
    pub exited: Vec<K>,
}

impl<K> Default for ReconcileReport<K> {
    fn default() -> Self {
        Self {
            entered: Vec::new(),
            updated: Vec::new(),
            exited: Vec::new(),
        }
    }
}

impl<K> ReconcileReport<K> {
    /// True when no node was created or removed.
    pub fn is_stable(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Synchronize `bound` with `items`.
///
/// Items whose key is already bound keep their node (update only); new keys
/// are entered then updated; keys missing from `items` are exited. Later
/// duplicates of a key are ignored.
pub fn reconcile<T, B>(
    stage: &mut Stage,
    bound: &mut KeyedNodes<B::Key>,
    items: &[T],
    binding: &B,
) -> ReconcileReport<B::Key>
where
    B: Binding<T>,
{
    let previous = std::mem::take(&mut bound.entries);
    let mut lookup: HashMap<B::Key, NodeId> = previous.iter().cloned().collect();
    let mut seen: HashSet<B::Key> = HashSet::with_capacity(items.len());
    let mut report = ReconcileReport::default();

    for item in items {
        let key = binding.key(item);
        if !seen.insert(key.clone()) {
            log::debug!("duplicate key {key:?} skipped during reconcile");
            continue;
        }
        let node = match lookup.remove(&key) {
            Some(node) => {
                report.updated.push(key.clone());
                node
            }
            None => {
                let node = binding.enter(stage, item);
                report.entered.push(key.clone());
                node
            }
        };
        binding.update(stage, node, item);
        bound.entries.push((key, node));
    }

    for (key, node) in previous {
        if lookup.remove(&key).is_some() {
            binding.exit(stage, node);
            report.exited.push(key);
        }
    }

    log::debug!(
        "reconciled: {} entered, {} updated, {} exited",
        report.entered.len(),
        report.updated.len(),
        report.exited.len()
    );
    report
}
