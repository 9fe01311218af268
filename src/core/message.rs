//! Conversion of logger arguments into message lists

use std::fmt;

/// Anything the logger accepts as the message arguments of one call.
///
/// A single string-like value becomes one message; a collection of
/// `Display` values becomes one message per element.
///
/// ```
/// use rust_event_stream::IntoMessages;
///
/// assert_eq!("ready".into_messages(), vec!["ready"]);
/// assert_eq!([1, 2, 3].into_messages(), vec!["1", "2", "3"]);
/// ```
pub trait IntoMessages {
    fn into_messages(self) -> Vec<String>;
}

impl IntoMessages for () {
    fn into_messages(self) -> Vec<String> {
        Vec::new()
    }
}

impl IntoMessages for &str {
    fn into_messages(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoMessages for String {
    fn into_messages(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoMessages for &String {
    fn into_messages(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoMessages for fmt::Arguments<'_> {
    fn into_messages(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl<T: fmt::Display> IntoMessages for Vec<T> {
    fn into_messages(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: fmt::Display, const N: usize> IntoMessages for [T; N] {
    fn into_messages(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: fmt::Display> IntoMessages for &[T] {
    fn into_messages(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_values() {
        assert_eq!("a".into_messages(), vec!["a"]);
        assert_eq!(String::from("b").into_messages(), vec!["b"]);
        assert_eq!(format_args!("{}-{}", 1, 2).into_messages(), vec!["1-2"]);
        assert!(().into_messages().is_empty());
    }

    #[test]
    fn test_collections() {
        let parts: &[&str] = &["x", "y"];
        assert_eq!(parts.into_messages(), vec!["x", "y"]);
        assert_eq!(vec![1.5, 2.0].into_messages(), vec!["1.5", "2"]);
        assert_eq!(["user", "42"].into_messages(), vec!["user", "42"]);
    }
}
