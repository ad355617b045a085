//! Hook dispatcher — runs a hook's callbacks in priority order and
//! consumes the registration.
//!
//! For `Filter` hooks:
//! - Each callback's return value replaces the first argument before the
//!   next callback runs.
//! - The dispatch result is the accumulated value.
//!
//! For `Action` hooks:
//! - Every callback sees the original arguments unchanged.
//! - The dispatch result is the last callback's return value, which
//!   conventional callers ignore.
//!
//! Either way, a completed dispatch empties the hook's entry; the hook
//! must be re-registered before it fires again.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::definitions::HookKind;
use crate::registry::HookRegistry;

/// Dispatches hooks against a shared [`HookRegistry`].
#[derive(Debug, Clone)]
pub(crate) struct HookDispatcher {
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    /// Creates a dispatcher over `registry`.
    pub(crate) fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Runs every callback registered at `(kind, name)`, then clears the
    /// hook's entry.
    ///
    /// Unknown names short-circuit: the first argument comes back
    /// unchanged (`Value::Null` when `args` is empty) and storage is
    /// untouched. A panicking callback propagates to the caller before
    /// the clear step runs, so the hook keeps its original contents.
    pub(crate) fn dispatch(&self, kind: HookKind, name: &str, args: &[Value]) -> Value {
        let mut value = args.first().cloned().unwrap_or(Value::Null);

        let Some(callbacks) = self.registry.snapshot(kind, name) else {
            return value;
        };

        debug!(
            kind = %kind,
            hook = %name,
            callback_count = callbacks.len(),
            "Dispatching hook"
        );

        let mut args = args.to_vec();
        for callback in &callbacks {
            value = callback(&args);

            // Filters accumulate through the first argument.
            if kind == HookKind::Filter {
                match args.first_mut() {
                    Some(first) => *first = value.clone(),
                    None => args.push(value.clone()),
                }
            }
        }

        self.registry.clear(kind, name);
        value
    }

    /// Returns the shared registry.
    pub(crate) fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}
