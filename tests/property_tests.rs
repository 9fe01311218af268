//! Property-based tests for rust_event_stream using proptest

use proptest::prelude::*;
use rust_event_stream::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Panic),
        Just(Level::Fatal),
        Just(Level::Error),
        Just(Level::Warning),
        Just(Level::Info),
        Just(Level::Debug),
        Just(Level::Trace),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Parsing accepts any casing of a level name
    #[test]
    fn test_level_parse_any_case(level in any_level(), mask in prop::collection::vec(any::<bool>(), 7)) {
        let mixed: String = level
            .to_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();

        prop_assert_eq!(parse_level(&mixed).unwrap(), level);
    }

    /// Anything that is not a level name is rejected with the input named
    #[test]
    fn test_level_parse_rejects_other_names(name in "[a-zA-Z]{0,12}") {
        let is_level = Level::ALL.iter().any(|l| l.to_str().eq_ignore_ascii_case(&name));
        prop_assume!(!is_level);

        let err = parse_level(&name).unwrap_err();
        prop_assert_eq!(err, EventError::UnknownLevel(name.clone()));
    }

    /// Value and label agree for every integer
    #[test]
    fn test_label_of_matches_from_value(value in -20i64..20) {
        match Level::from_value(value) {
            Some(level) => {
                prop_assert_eq!(level.value(), value);
                prop_assert_eq!(Level::label_of(value), level.to_str());
            }
            None => prop_assert_eq!(Level::label_of(value), "Unknown"),
        }
    }
}

// ============================================================================
// Logger Filtering Tests
// ============================================================================

proptest! {
    /// For any threshold, exactly the levels with value >= threshold pass
    #[test]
    fn test_filter_rule(threshold in any_level()) {
        let stream = Arc::new(SyncStream::new(&Context::background(), 16));
        let logger = Logger::new();
        logger.with_stream(stream.clone());
        logger.set_log_level(threshold);

        for level in Level::ALL {
            logger.log(level, level.to_str());
        }

        let delivered: Vec<i64> = stream.get().try_iter().map(|e| e.value()).collect();
        let expected: Vec<i64> = Level::ALL
            .iter()
            .map(|l| l.value())
            .filter(|v| *v >= threshold.value())
            .collect();
        prop_assert_eq!(delivered, expected);
    }

    /// Derived loggers always start at Info and never leak tags back
    #[test]
    fn test_derivation_resets_threshold(
        threshold in any_level(),
        tags in prop::collection::hash_map("[a-z]{1,6}", "[a-z]{0,6}", 0..6),
    ) {
        let parent = Logger::new().with_tag("base", "1");
        parent.set_log_level(threshold);

        let child = parent.with_tags(tags.clone());

        prop_assert_eq!(child.log_level(), Level::Info);
        prop_assert_eq!(parent.log_level(), threshold);
        prop_assert_eq!(parent.tags(), &HashMap::from([("base".to_string(), "1".to_string())]));
        for (k, v) in &tags {
            prop_assert_eq!(child.tags().get(k), Some(v));
        }
    }
}

// ============================================================================
// Sync Stream Tests
// ============================================================================

proptest! {
    /// Buffered events come back in send order
    #[test]
    fn test_sync_fifo(values in prop::collection::vec(any::<i64>(), 0..64)) {
        let stream = SyncStream::new(&Context::background(), values.len());
        for v in &values {
            stream.send(Event::new(Any(*v), HashMap::new(), ()));
        }
        stream.close();

        let got: Vec<i64> = stream.get().iter().map(|e| e.value()).collect();
        prop_assert_eq!(got, values);
    }
}
