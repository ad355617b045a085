//! Public facade — the action and filter APIs over one shared registry.

use std::sync::Arc;

use serde_json::Value;

use crate::definitions::{Callback, DEFAULT_PRIORITY, HookKind, Priority};
use crate::dispatcher::HookDispatcher;
use crate::registry::HookRegistry;

/// The hook registry facade.
///
/// Owns the callback storage for both hook kinds and exposes the action
/// and filter operation sets. Clones share the same underlying registry,
/// so one `Hooks` value can be handed to every component that registers
/// or fires hooks.
///
/// Callbacks run in ascending priority order (registration order within
/// a priority), and firing a hook consumes its registration: the hook
/// must be re-registered before it fires again.
///
/// # Examples
///
/// ```
/// use hookchain::{Hooks, callback};
/// use serde_json::json;
///
/// let hooks = Hooks::new();
/// hooks.add_filter(
///     "greet",
///     callback(|args| json!(format!("{} world", args[0].as_str().unwrap()))),
/// );
/// assert_eq!(hooks.apply_filters("greet", json!("hello")), json!("hello world"));
/// ```
#[derive(Debug, Clone)]
pub struct Hooks {
    dispatcher: HookDispatcher,
}

impl Hooks {
    /// Creates a new facade with an empty registry.
    pub fn new() -> Self {
        Self {
            dispatcher: HookDispatcher::new(Arc::new(HookRegistry::new())),
        }
    }

    fn registry(&self) -> &HookRegistry {
        self.dispatcher.registry()
    }

    // ── Actions ──

    /// Registers `callback` under `name` at [`DEFAULT_PRIORITY`].
    pub fn add_action(&self, name: &str, callback: Callback) {
        self.add_action_at(name, callback, DEFAULT_PRIORITY);
    }

    /// Registers `callback` under `name` at an explicit priority.
    /// Registering the same callback twice keeps both entries; both run
    /// on dispatch.
    pub fn add_action_at(&self, name: &str, callback: Callback, priority: impl Into<Priority>) {
        self.registry()
            .register(HookKind::Action, name, callback, priority.into());
    }

    /// Fires the action: every callback registered under `name` runs in
    /// priority order with `args`, then the registration is consumed.
    ///
    /// Returns the last callback's return value. Action callers
    /// conventionally ignore it, but the passthrough is preserved.
    pub fn do_action(&self, name: &str, args: &[Value]) -> Value {
        self.dispatcher.dispatch(HookKind::Action, name, args)
    }

    /// Returns whether `callback` is registered under `name` at any
    /// priority. Identity comparison only.
    pub fn has_action(&self, name: &str, callback: &Callback) -> bool {
        self.registry().exists(HookKind::Action, name, callback)
    }

    /// Removes the first occurrence of `callback` registered under
    /// `name` at exactly `priority`. Returns whether a removal occurred.
    pub fn remove_action(
        &self,
        name: &str,
        callback: &Callback,
        priority: impl Into<Priority>,
    ) -> bool {
        self.registry()
            .unregister(HookKind::Action, name, callback, priority.into())
    }

    /// Removes every callback under `name`, across all priorities.
    /// Returns `false` when the name was never registered.
    pub fn remove_all_actions(&self, name: &str) -> bool {
        self.registry().unregister_all(HookKind::Action, name, None)
    }

    /// Removes every callback under `name` at exactly `priority`.
    pub fn remove_all_actions_at(&self, name: &str, priority: impl Into<Priority>) -> bool {
        self.registry()
            .unregister_all(HookKind::Action, name, Some(priority.into()))
    }

    // ── Filters ──

    /// Registers `callback` under `name` at [`DEFAULT_PRIORITY`].
    pub fn add_filter(&self, name: &str, callback: Callback) {
        self.add_filter_at(name, callback, DEFAULT_PRIORITY);
    }

    /// Registers `callback` under `name` at an explicit priority.
    pub fn add_filter_at(&self, name: &str, callback: Callback, priority: impl Into<Priority>) {
        self.registry()
            .register(HookKind::Filter, name, callback, priority.into());
    }

    /// Pipes `value` through the filter chain registered under `name`
    /// and consumes the registration. Unknown names return `value`
    /// unchanged.
    pub fn apply_filters(&self, name: &str, value: Value) -> Value {
        self.apply_filters_with(name, value, &[])
    }

    /// Like [`apply_filters`](Hooks::apply_filters), with extra
    /// arguments passed to every callback after the accumulating value.
    /// Only the first argument accumulates between callbacks.
    pub fn apply_filters_with(&self, name: &str, value: Value, extra: &[Value]) -> Value {
        let mut args = Vec::with_capacity(1 + extra.len());
        args.push(value);
        args.extend_from_slice(extra);
        self.dispatcher.dispatch(HookKind::Filter, name, &args)
    }

    /// Returns whether `callback` is registered under `name` at any
    /// priority.
    pub fn has_filter(&self, name: &str, callback: &Callback) -> bool {
        self.registry().exists(HookKind::Filter, name, callback)
    }

    /// Removes the first occurrence of `callback` registered under
    /// `name` at exactly `priority`.
    pub fn remove_filter(
        &self,
        name: &str,
        callback: &Callback,
        priority: impl Into<Priority>,
    ) -> bool {
        self.registry()
            .unregister(HookKind::Filter, name, callback, priority.into())
    }

    /// Removes every callback under `name`, across all priorities.
    pub fn remove_all_filters(&self, name: &str) -> bool {
        self.registry().unregister_all(HookKind::Filter, name, None)
    }

    /// Removes every callback under `name` at exactly `priority`.
    pub fn remove_all_filters_at(&self, name: &str, priority: impl Into<Priority>) -> bool {
        self.registry()
            .unregister_all(HookKind::Filter, name, Some(priority.into()))
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::callback;
    use serde_json::json;

    #[test]
    fn test_default_priority_is_ten() {
        let hooks = Hooks::new();
        let cb = callback(|_| Value::Null);

        hooks.add_action("init", cb.clone());
        // Removal requires the exact bucket, so this only succeeds if
        // the default registration landed at priority 10.
        assert!(hooks.remove_action("init", &cb, 10));
    }

    #[test]
    fn test_clones_share_one_registry() {
        let hooks = Hooks::new();
        let via_clone = hooks.clone();
        let cb = callback(|_| Value::Null);

        via_clone.add_filter("render", cb.clone());
        assert!(hooks.has_filter("render", &cb));
    }

    #[test]
    fn test_action_and_filter_namespaces_are_independent() {
        let hooks = Hooks::new();
        let cb = callback(|_| Value::Null);

        hooks.add_action("shared-name", cb.clone());
        assert!(hooks.has_action("shared-name", &cb));
        assert!(!hooks.has_filter("shared-name", &cb));
    }

    #[test]
    fn test_apply_filters_with_extra_args() {
        let hooks = Hooks::new();
        hooks.add_filter(
            "suffix",
            callback(|args| {
                json!(format!(
                    "{}{}",
                    args[0].as_str().unwrap_or_default(),
                    args[1].as_str().unwrap_or_default()
                ))
            }),
        );

        let result = hooks.apply_filters_with("suffix", json!("body"), &[json!(".txt")]);
        assert_eq!(result, json!("body.txt"));
    }
}
