//! Hook registry — callbacks organized by kind, hook name, and priority.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::definitions::{Callback, HookKind, Priority};

/// Hook name → priority → callbacks registered at that priority, in
/// registration order.
type HookMap = HashMap<String, BTreeMap<Priority, Vec<Callback>>>;

/// Storage for both hook kinds. The namespaces are independent: the
/// same name may exist under both kinds without collision.
#[derive(Default)]
struct Storage {
    actions: HookMap,
    filters: HookMap,
}

impl Storage {
    fn map(&self, kind: HookKind) -> &HookMap {
        match kind {
            HookKind::Action => &self.actions,
            HookKind::Filter => &self.filters,
        }
    }

    fn map_mut(&mut self, kind: HookKind) -> &mut HookMap {
        match kind {
            HookKind::Action => &mut self.actions,
            HookKind::Filter => &mut self.filters,
        }
    }
}

/// Priority-ordered callback storage shared by the action and filter
/// APIs.
///
/// Every operation reports "not found" through its return value; the
/// registry itself never fails. Dispatch-time behavior (pipeline
/// semantics, clear-on-completion) lives in the dispatcher.
pub(crate) struct HookRegistry {
    storage: RwLock<Storage>,
}

impl HookRegistry {
    /// Creates a new empty registry.
    pub(crate) fn new() -> Self {
        Self {
            storage: RwLock::new(Storage::default()),
        }
    }

    // The lock is never held across a user callback, so a poisoned lock
    // can only come from a panic inside registry code itself. Recover
    // the guard instead of propagating.
    fn read(&self) -> RwLockReadGuard<'_, Storage> {
        self.storage.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Storage> {
        self.storage.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `callback` at `(kind, name, priority)`, creating the
    /// intermediate levels as needed. Duplicate registrations are kept
    /// and each entry runs on dispatch.
    ///
    /// Returns the hook's current priority → callback count mapping for
    /// introspection.
    pub(crate) fn register(
        &self,
        kind: HookKind,
        name: &str,
        callback: Callback,
        priority: Priority,
    ) -> BTreeMap<Priority, usize> {
        let mut storage = self.write();
        let buckets = storage.map_mut(kind).entry(name.to_string()).or_default();
        buckets.entry(priority).or_default().push(callback);

        debug!(
            kind = %kind,
            hook = %name,
            priority = %priority,
            "Hook callback registered"
        );

        buckets
            .iter()
            .map(|(priority, list)| (*priority, list.len()))
            .collect()
    }

    /// Returns the hook's callbacks flattened into dispatch order
    /// (ascending priority, registration order within a priority), or
    /// `None` if `name` was never registered under `kind`.
    pub(crate) fn snapshot(&self, kind: HookKind, name: &str) -> Option<Vec<Callback>> {
        let storage = self.read();
        storage
            .map(kind)
            .get(name)
            .map(|buckets| buckets.values().flatten().cloned().collect())
    }

    /// Empties a hook's entry after a completed dispatch. The name key
    /// stays behind, so the hook reads as seen-but-empty afterwards.
    pub(crate) fn clear(&self, kind: HookKind, name: &str) {
        let mut storage = self.write();
        if let Some(buckets) = storage.map_mut(kind).get_mut(name) {
            buckets.clear();
            debug!(kind = %kind, hook = %name, "Hook cleared after dispatch");
        }
    }

    /// Returns whether `callback` appears, by identity, in any priority
    /// list under `name`. Unknown names are `false`; an empty entry is
    /// indistinguishable from an absent one.
    pub(crate) fn exists(&self, kind: HookKind, name: &str, callback: &Callback) -> bool {
        let storage = self.read();
        let Some(buckets) = storage.map(kind).get(name) else {
            return false;
        };
        buckets
            .values()
            .flatten()
            .any(|registered| Arc::ptr_eq(registered, callback))
    }

    /// Removes the first identity match of `callback` within exactly the
    /// `priority` bucket of `name`. Other buckets are not searched.
    /// Returns whether a removal occurred.
    pub(crate) fn unregister(
        &self,
        kind: HookKind,
        name: &str,
        callback: &Callback,
        priority: Priority,
    ) -> bool {
        let mut storage = self.write();
        let Some(list) = storage
            .map_mut(kind)
            .get_mut(name)
            .and_then(|buckets| buckets.get_mut(&priority))
        else {
            return false;
        };

        let Some(index) = list.iter().position(|registered| Arc::ptr_eq(registered, callback))
        else {
            return false;
        };
        list.remove(index);

        debug!(
            kind = %kind,
            hook = %name,
            priority = %priority,
            "Hook callback removed"
        );
        true
    }

    /// Empties every priority bucket under `name`, or only the given
    /// one. Emptied buckets keep their keys. Returns `false` when the
    /// name (or the requested bucket) doesn't exist.
    pub(crate) fn unregister_all(
        &self,
        kind: HookKind,
        name: &str,
        priority: Option<Priority>,
    ) -> bool {
        let mut storage = self.write();
        let Some(buckets) = storage.map_mut(kind).get_mut(name) else {
            return false;
        };

        match priority {
            None => buckets.clear(),
            Some(priority) => {
                let Some(list) = buckets.get_mut(&priority) else {
                    return false;
                };
                list.clear();
            }
        }

        debug!(kind = %kind, hook = %name, "Hook callbacks removed in bulk");
        true
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.read();
        f.debug_struct("HookRegistry")
            .field("actions", &storage.actions.len())
            .field("filters", &storage.filters.len())
            .finish()
    }
}
