//! # hookchain
//!
//! Priority-ordered action and filter hook registry. Two related
//! publish/subscribe mechanisms share one storage and dispatch engine:
//!
//! - **Actions** fire side-effecting callbacks; the dispatch result is
//!   the last callback's return value, which callers conventionally
//!   ignore.
//! - **Filters** pipe a value through an ordered chain of transforming
//!   callbacks; each return value feeds the next callback.
//!
//! Callbacks registered under a hook name run in ascending priority
//! order (lower first; registration order within a priority), and a
//! dispatch consumes the registration: the hook must be re-registered
//! before it fires again. Callbacks are compared by identity, never by
//! behavior.
//!
//! The registry is an explicit object — construct a [`Hooks`] value and
//! share it (clones are cheap and share storage) rather than relying on
//! process-wide globals. Dispatch is fully synchronous and runs in the
//! calling thread.
//!
//! ```
//! use hookchain::{Hooks, callback};
//! use serde_json::json;
//!
//! let hooks = Hooks::new();
//! hooks.add_filter_at(
//!     "greet",
//!     callback(|args| json!(format!("{} world", args[0].as_str().unwrap()))),
//!     10,
//! );
//! hooks.add_filter_at(
//!     "greet",
//!     callback(|args| json!(format!("{}!", args[0].as_str().unwrap()))),
//!     5,
//! );
//!
//! // Priority 5 runs first, then priority 10.
//! assert_eq!(hooks.apply_filters("greet", json!("hello")), json!("hello! world"));
//! ```

mod definitions;
mod dispatcher;
mod hooks;
mod registry;

pub use definitions::{Callback, DEFAULT_PRIORITY, HookKind, Priority, callback};
pub use hooks::Hooks;
