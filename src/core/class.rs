//! Event classes
//!
//! A [`Class`] tags every [`Event`](super::Event) with a category or severity.
//! Its integer [`value`](Class::value) is the only key used for ordering and
//! filtering; its `Display` output is the human label.

use std::fmt;

/// Category or severity attached to an event.
///
/// Implementations must be safe to share between threads, since the same
/// class instance travels with events across delivery tasks.
///
/// # Example
///
/// ```
/// use rust_event_stream::Class;
/// use std::fmt;
///
/// #[derive(Debug)]
/// struct Audit;
///
/// impl fmt::Display for Audit {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("Audit")
///     }
/// }
///
/// impl Class for Audit {
///     fn value(&self) -> i64 {
///         100
///     }
/// }
///
/// assert_eq!(Audit.label(), "Audit");
/// ```
pub trait Class: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Ordering key of this class
    fn value(&self) -> i64;

    /// Human readable label
    fn label(&self) -> String {
        self.to_string()
    }
}

/// Opaque integer category with no ordering semantics of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Any(pub i64);

impl fmt::Display for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Class for Any {
    fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Any {
    fn from(value: i64) -> Self {
        Any(value)
    }
}
