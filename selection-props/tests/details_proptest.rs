//! Property-based tests for selection classification and counting
//!
//! These tests check that:
//! - Strict JSON arrays and objects always report their exact size
//! - Classification is deterministic for arbitrary input
//! - Line and word counts follow the range and token rules

use proptest::prelude::*;
use selection_props::{
    get_details,
    selection::{line_count, word_count, Position, SelectionRange},
};
use serde_json::Value;

/// Generate JSON scalars that survive whitespace stripping unchanged
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-zA-Z0-9]{0,8}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// Generate text that looks vaguely like selected code
fn selection_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Arbitrary printable text
        "\\PC{0,48}",
        // Near-JSON
        "[{\\[][a-z:'\", 0-9]{0,24}[}\\],;]?",
        // Tag soup
        "(<[a-z]{1,3}>|</[a-z]{1,3}>|[a-z ]{0,4}){0,8}",
    ]
}

/// Generate words that survive word counting
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z]{2,10}"
}

fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("-"), Just(", "), Just("\n"), Just("  ")]
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_strict_arrays_report_length(items in prop::collection::vec(scalar_strategy(), 0..12)) {
            let text = serde_json::to_string(&Value::Array(items.clone())).unwrap();
            let details = get_details(&text);

            prop_assert_eq!(details.array_length, Some(items.len()), "input: {}", text);
            prop_assert_eq!(details.object_size, None);
            prop_assert_eq!(details.nodes, None);
            prop_assert_eq!(details.child_nodes, None);
        }

        #[test]
        fn test_pretty_arrays_report_length(items in prop::collection::vec(scalar_strategy(), 1..8)) {
            let text = serde_json::to_string_pretty(&items).unwrap();
            prop_assert_eq!(get_details(&text).array_length, Some(items.len()));
        }

        #[test]
        fn test_strict_objects_report_size(
            entries in prop::collection::btree_map("[a-z]{1,6}", scalar_strategy(), 0..10)
        ) {
            let text = serde_json::to_string(&entries).unwrap();
            let details = get_details(&text);

            prop_assert_eq!(details.object_size, Some(entries.len()), "input: {}", text);
            prop_assert_eq!(details.array_length, None);
        }

        #[test]
        fn test_classification_is_deterministic(text in selection_text_strategy()) {
            prop_assert_eq!(get_details(&text), get_details(&text));
        }

        #[test]
        fn test_word_count_matches_word_list(
            words in prop::collection::vec(word_strategy(), 0..12),
            separator in separator_strategy(),
        ) {
            let text = words.join(separator);
            prop_assert_eq!(word_count(&text), words.len(), "input: {:?}", text);
        }

        #[test]
        fn test_line_count_distinct_start_lines(
            spans in prop::collection::btree_map(0u32..1000, 0u32..20, 1..8)
        ) {
            let ranges: Vec<SelectionRange> = spans
                .iter()
                .map(|(&start, &span)| {
                    SelectionRange::new(Position::new(start, 0), Position::new(start + span, 1), "x")
                })
                .collect();

            let expected: usize = spans.values().map(|&span| span as usize + 1).sum();
            prop_assert_eq!(line_count(&ranges), expected);
        }

        #[test]
        fn test_line_count_repeated_start_line(start in 0u32..1000, copies in 1usize..6) {
            let range = SelectionRange::new(Position::new(start, 0), Position::new(start, 3), "abc");
            let ranges = vec![range; copies];
            prop_assert_eq!(line_count(&ranges), 1);
        }
    }
}
