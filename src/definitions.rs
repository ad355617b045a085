//! Hook vocabulary — kinds, priorities, and the callback type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Priority assigned when a callback is added without an explicit one.
pub const DEFAULT_PRIORITY: Priority = Priority::Value(10);

/// The two hook kinds. Storage is identical for both; only dispatch
/// semantics differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Callbacks run for side effects; return values are not chained.
    Action,
    /// Callbacks transform a value, each feeding the next.
    Filter,
}

impl HookKind {
    /// Returns the string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Filter => "filter",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution ordering key for a registered callback.
///
/// Numeric priorities dispatch in ascending order, lower first. Anything
/// that fails to coerce to an integer collapses into the single
/// [`Unordered`] bucket, which dispatches after every numeric priority.
///
/// [`Unordered`]: Priority::Unordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// An integer priority; lower runs earlier.
    Value(i64),
    /// The non-numeric bucket; runs after all numeric priorities.
    Unordered,
}

impl Priority {
    /// Whether this is the non-numeric bucket.
    pub fn is_unordered(&self) -> bool {
        matches!(self, Self::Unordered)
    }
}

impl Default for Priority {
    fn default() -> Self {
        DEFAULT_PRIORITY
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self::Value(value)
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<f64> for Priority {
    /// Truncates toward zero. NaN and the infinities are not numeric.
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value.trunc() as i64)
        } else {
            Self::Unordered
        }
    }
}

impl From<&str> for Priority {
    /// Leading-integer coercion: optional sign followed by decimal
    /// digits, after trimming leading whitespace. Trailing garbage is
    /// ignored; anything without a leading integer is `Unordered`.
    fn from(value: &str) -> Self {
        let trimmed = value.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let len = digits.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            return Self::Unordered;
        }

        match digits[..len].parse::<i64>() {
            Ok(n) => Self::Value(if negative { -n } else { n }),
            // Out-of-range inputs clamp rather than fall into the
            // non-numeric bucket.
            Err(_) => Self::Value(if negative { i64::MIN } else { i64::MAX }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(n) => write!(f, "{n}"),
            Self::Unordered => write!(f, "unordered"),
        }
    }
}

/// A registered hook callback.
///
/// Callbacks receive the full argument sequence and return a value; for
/// filters the return value replaces the first argument before the next
/// callback runs. The registry compares callbacks by identity
/// (`Arc::ptr_eq`) only — two distinct closures with identical behavior
/// are never equal.
pub type Callback = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Wraps a closure into a [`Callback`] with stable identity.
///
/// Keep the returned value around if you intend to remove the callback
/// or check for its presence later; a fresh wrap of the same closure is
/// a different callback as far as the registry is concerned.
pub fn callback<F>(f: F) -> Callback
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}
