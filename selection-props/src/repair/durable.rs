//! Built-in "durable JSON" repairer.

use std::{iter::Peekable, str::Chars};

use super::{parse_strict, JsonFix, JsonRepairer, RepairOutcome};
use crate::error::RepairError;

/// Fix combinations tried in order, single fixes first.
const FIX_PIPELINES: &[&[JsonFix]] = &[
    &[JsonFix::TrailingCommas],
    &[JsonFix::SingleQuotes],
    &[JsonFix::UnquotedKeys],
    &[JsonFix::SmartQuotes],
    &[JsonFix::HexNumbers],
    &[JsonFix::MissingCommas],
    &[JsonFix::UnclosedBraces],
    // Selected code is mostly JS object literals: {name: 'Alice'}
    &[JsonFix::UnquotedKeys, JsonFix::SingleQuotes],
    &[JsonFix::SmartQuotes, JsonFix::SingleQuotes],
    &[JsonFix::UnquotedKeys, JsonFix::TrailingCommas],
    &[JsonFix::MissingCommas, JsonFix::UnquotedKeys],
    &[JsonFix::UnquotedKeys, JsonFix::UnquotedValues],
    &[
        JsonFix::SmartQuotes,
        JsonFix::UnquotedKeys,
        JsonFix::TrailingCommas,
    ],
];

/// Every fix, in an order where earlier fixes don't undo later ones.
///
/// Braces are closed before trailing commas are removed so that `[1,2,`
/// becomes `[1,2]`.
const FULL_PIPELINE: &[JsonFix] = &[
    JsonFix::SmartQuotes,
    JsonFix::HexNumbers,
    JsonFix::UnquotedKeys,
    JsonFix::SingleQuotes,
    JsonFix::MissingCommas,
    JsonFix::UnclosedBraces,
    JsonFix::TrailingCommas,
];

/// Repairer that applies textual fixes until the text parses as JSON.
///
/// Fix combinations are tried from cheapest to most aggressive and the
/// first one whose output parses wins. Only combinations that actually
/// changed the text count against `max_attempts`.
///
/// # Examples
///
/// ```
/// use selection_props::repair::{DurableJsonRepairer, JsonRepairer};
///
/// let repairer = DurableJsonRepairer::default();
/// let outcome = repairer.repair("{name:'Alice',age:30,}").unwrap();
/// assert_eq!(outcome.json, r#"{"name":"Alice","age":30}"#);
/// ```
#[derive(Debug, Clone)]
pub struct DurableJsonRepairer {
    /// Maximum number of fixed candidates to parse.
    max_attempts: usize,
}

impl Default for DurableJsonRepairer {
    fn default() -> Self {
        Self { max_attempts: 16 }
    }
}

impl DurableJsonRepairer {
    /// Creates a repairer that parses at most `max_attempts` candidates.
    #[inline]
    pub const fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Returns the attempt budget.
    #[inline]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Runs `fixes` in sequence. Returns `None` if none of them applied.
    fn run_pipeline(input: &str, fixes: &[JsonFix]) -> Option<(String, Vec<JsonFix>)> {
        let mut current = input.to_string();
        let mut applied = Vec::new();

        for &fix in fixes {
            if let Some(fixed) = fix.apply(&current) {
                current = fixed;
                applied.push(fix);
            }
        }

        (!applied.is_empty()).then_some((current, applied))
    }
}

impl JsonRepairer for DurableJsonRepairer {
    #[inline]
    fn name(&self) -> &'static str {
        "durable_json"
    }

    fn repair(&self, text: &str) -> Result<RepairOutcome, RepairError> {
        let input = text.trim();
        if input.is_empty() {
            return Err(RepairError::EmptyInput);
        }

        if parses(input) {
            return Ok(RepairOutcome::unchanged(input));
        }

        let mut attempts = 0;
        let pipelines = FIX_PIPELINES
            .iter()
            .copied()
            .chain(std::iter::once(FULL_PIPELINE));

        for pipeline in pipelines {
            if attempts >= self.max_attempts {
                break;
            }

            let Some((fixed, applied)) = Self::run_pipeline(input, pipeline) else {
                continue;
            };
            attempts += 1;

            if parses(&fixed) {
                return Ok(RepairOutcome::fixed(fixed, applied));
            }
        }

        Err(RepairError::Unrepairable { attempts })
    }
}

#[inline]
fn parses(text: &str) -> bool {
    parse_strict(text).is_ok()
}

/// Copies any whitespace from `chars` into `out`.
#[inline]
fn copy_whitespace(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(ws) = chars.next_if(|c| c.is_whitespace()) {
        out.push(ws);
    }
}

/// Quotes bare object keys.
///
/// Converts: `{name: "Alice"}` → `{"name": "Alice"}`
pub(crate) fn quote_unquoted_keys(input: &str) -> Option<String> {
    let mut result = String::with_capacity(input.len() + 16);
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;
    let mut modified = false;

    while let Some(ch) = chars.next() {
        result.push(ch);

        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' | ',' if !in_string => {
                copy_whitespace(&mut chars, &mut result);

                if !chars.peek().is_some_and(|&c| c.is_alphabetic() || c == '_') {
                    continue;
                }

                let mut key = String::new();
                while let Some(c) = chars.next_if(|&c| c.is_alphanumeric() || c == '_') {
                    key.push(c);
                }
                let mut gap = String::new();
                copy_whitespace(&mut chars, &mut gap);

                if chars.peek() == Some(&':') {
                    result.push('"');
                    result.push_str(&key);
                    result.push('"');
                    modified = true;
                } else {
                    result.push_str(&key);
                }
                result.push_str(&gap);
            }
            _ => {}
        }
    }

    modified.then_some(result)
}

/// Removes commas directly before a closing brace or bracket.
///
/// Converts: `{"a": 1,}` → `{"a": 1}`
pub(crate) fn remove_trailing_commas(input: &str) -> Option<String> {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;
    let mut modified = false;

    while let Some(ch) = chars.next() {
        if escape_next {
            escape_next = false;
            result.push(ch);
            continue;
        }

        match ch {
            '\\' if in_string => {
                escape_next = true;
                result.push(ch);
            }
            '"' => {
                in_string = !in_string;
                result.push(ch);
            }
            ',' if !in_string => {
                let next = chars.clone().find(|c| !c.is_whitespace());
                if matches!(next, Some('}' | ']')) {
                    modified = true;
                } else {
                    result.push(ch);
                }
            }
            _ => result.push(ch),
        }
    }

    modified.then_some(result)
}

/// Converts single-quoted strings to double-quoted ones.
///
/// Converts: `{'name': 'Alice'}` → `{"name": "Alice"}`
/// Preserves: `{"text": "It's working"}`
pub(crate) fn convert_single_quotes(input: &str) -> Option<String> {
    if !input.contains('\'') {
        return None;
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_double_quote = false;
    let mut in_single_quote = false;
    let mut escape_next = false;
    let mut modified = false;

    while let Some(ch) = chars.next() {
        if escape_next {
            result.push(ch);
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_double_quote || in_single_quote => {
                escape_next = true;
                result.push(ch);
            }
            '"' if in_single_quote => {
                result.push_str("\\\"");
                modified = true;
            }
            '"' => {
                in_double_quote = !in_double_quote;
                result.push(ch);
            }
            '\'' if in_double_quote => result.push(ch),
            '\'' if in_single_quote => {
                in_single_quote = false;
                result.push('"');
                modified = true;
            }
            '\'' => {
                if opens_single_quoted(&result, chars.peek().copied()) {
                    in_single_quote = true;
                    result.push('"');
                    modified = true;
                } else {
                    result.push(ch);
                }
            }
            _ => result.push(ch),
        }
    }

    modified.then_some(result)
}

/// A single quote is a string delimiter when it follows or precedes JSON
/// structure; anything else is an apostrophe.
fn opens_single_quoted(before: &str, next: Option<char>) -> bool {
    matches!(before.trim_end().chars().last(), Some(':' | '[' | '{' | ','))
        || matches!(next, Some('}' | ']' | ',' | ':'))
}

/// Normalizes smart/curly quotes to ASCII quotes.
pub(crate) fn normalize_smart_quotes(input: &str) -> Option<String> {
    const DOUBLE: [char; 4] = ['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}'];
    const SINGLE: [char; 4] = ['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];

    if !input.contains(DOUBLE) && !input.contains(SINGLE) {
        return None;
    }

    Some(input.replace(DOUBLE, "\"").replace(SINGLE, "'"))
}

/// Closes unclosed strings, braces and brackets in nesting order.
///
/// Converts: `{"items": [1, 2` → `{"items": [1, 2]}`
pub(crate) fn close_unclosed_braces(input: &str) -> Option<String> {
    let mut closers = Vec::new();
    let mut in_string = false;
    let mut escape_next = false;

    for ch in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => closers.push('}'),
            '[' if !in_string => closers.push(']'),
            '}' | ']' if !in_string => {
                if closers.last() == Some(&ch) {
                    closers.pop();
                }
            }
            _ => {}
        }
    }

    if !in_string && closers.is_empty() {
        return None;
    }

    let mut result = input.to_string();
    if in_string {
        result.push('"');
    }
    result.extend(closers.iter().rev());
    Some(result)
}

/// Adds missing commas between adjacent values.
///
/// Converts: `{"a": 1 "b": 2}` → `{"a": 1 ,"b": 2}`
pub(crate) fn insert_missing_commas(input: &str) -> Option<String> {
    let mut result = String::with_capacity(input.len() + 8);
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;
    let mut modified = false;
    let mut depth = 0usize;

    while let Some(ch) = chars.next() {
        if escape_next {
            escape_next = false;
            result.push(ch);
            continue;
        }

        match ch {
            '\\' if in_string => {
                escape_next = true;
                result.push(ch);
            }
            '"' => {
                in_string = !in_string;
                result.push(ch);

                if !in_string && depth > 0 && comma_after_value(&mut chars, &mut result) {
                    modified = true;
                }
            }
            '{' | '[' if !in_string => {
                depth += 1;
                result.push(ch);
            }
            '}' | ']' if !in_string => {
                depth = depth.saturating_sub(1);
                result.push(ch);

                if depth > 0 && comma_after_value(&mut chars, &mut result) {
                    modified = true;
                }
            }
            _ => result.push(ch),
        }
    }

    modified.then_some(result)
}

/// After a closed value, adds a comma if another value starts right away.
fn comma_after_value(chars: &mut Peekable<Chars<'_>>, result: &mut String) -> bool {
    copy_whitespace(chars, result);

    if matches!(chars.peek(), Some('"' | '{' | '[')) && !result.ends_with(',') {
        result.push(',');
        return true;
    }
    false
}

/// Converts JavaScript hex literals to decimal.
///
/// Converts: `{"age": 0x1E}` → `{"age": 30}`
pub(crate) fn convert_hex_numbers(input: &str) -> Option<String> {
    if !input.contains("0x") && !input.contains("0X") {
        return None;
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut modified = false;

    while let Some(ch) = chars.next() {
        if ch != '0' {
            result.push(ch);
            continue;
        }

        let Some(marker) = chars.next_if(|&c| c == 'x' || c == 'X') else {
            result.push(ch);
            continue;
        };

        let mut digits = String::new();
        while let Some(digit) = chars.next_if(char::is_ascii_hexdigit) {
            digits.push(digit);
        }

        match u64::from_str_radix(&digits, 16) {
            Ok(number) => {
                result.push_str(&number.to_string());
                modified = true;
            }
            Err(_) => {
                result.push(ch);
                result.push(marker);
                result.push_str(&digits);
            }
        }
    }

    modified.then_some(result)
}

/// Quotes bare values up to the next `,`, `}`, `]` or newline.
///
/// Converts: `{"key": some value}` → `{"key": "some value"}`
///
/// Values starting like a number, literal, string or container are left
/// alone.
pub(crate) fn quote_unquoted_values(input: &str) -> Option<String> {
    let mut result = String::with_capacity(input.len() + 16);
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;
    let mut modified = false;

    while let Some(ch) = chars.next() {
        if escape_next {
            escape_next = false;
            result.push(ch);
            continue;
        }

        match ch {
            '\\' if in_string => {
                escape_next = true;
                result.push(ch);
            }
            '"' => {
                in_string = !in_string;
                result.push(ch);
            }
            ':' if !in_string => {
                result.push(ch);
                copy_whitespace(&mut chars, &mut result);

                let is_bare = chars.peek().is_some_and(|&c| {
                    !c.is_numeric() && !matches!(c, '"' | '\'' | '{' | '[' | '-' | 't' | 'f' | 'n')
                });
                if !is_bare {
                    continue;
                }

                let mut value = String::new();
                while let Some(c) = chars.next_if(|&c| !matches!(c, ',' | '}' | ']' | '\n')) {
                    value.push(c);
                }

                let trimmed = value.trim();
                if trimmed.is_empty() {
                    result.push_str(&value);
                } else {
                    result.push('"');
                    result.push_str(&trimmed.replace('"', "\\\""));
                    result.push('"');
                    modified = true;
                }
            }
            _ => result.push(ch),
        }
    }

    modified.then_some(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    fn repaired_value(input: &str) -> Value {
        let outcome = DurableJsonRepairer::default().repair(input).unwrap();
        serde_json::from_str(&outcome.json).unwrap()
    }

    #[test]
    fn test_fix_trailing_commas() {
        assert_eq!(repaired_value(r#"{"name": "Alice",}"#), json!({"name": "Alice"}));
        assert_eq!(repaired_value("[1, 2, ]"), json!([1, 2]));
    }

    #[test]
    fn test_trailing_comma_inside_string_is_kept() {
        assert_eq!(remove_trailing_commas(r#"{"a": ",}"}"#), None);
    }

    #[test]
    fn test_fix_single_quotes() {
        assert_eq!(repaired_value("{'name': 'Alice'}"), json!({"name": "Alice"}));
    }

    #[test]
    fn test_single_quotes_preserve_apostrophes() {
        assert_eq!(convert_single_quotes(r#"{"text": "It's working"}"#), None);
    }

    #[test]
    fn test_single_quotes_escape_inner_double_quotes() {
        assert_eq!(
            repaired_value(r#"{'say': 'a "b"'}"#),
            json!({"say": "a \"b\""})
        );
    }

    #[test]
    fn test_fix_unquoted_keys() {
        assert_eq!(repaired_value(r#"{name: "Alice"}"#), json!({"name": "Alice"}));
    }

    #[test]
    fn test_unquoted_keys_ignore_string_content() {
        assert_eq!(quote_unquoted_keys(r#"{"a": "x,y: z"}"#), None);
    }

    #[test]
    fn test_unquoted_keys_with_single_quotes() {
        let outcome = DurableJsonRepairer::default()
            .repair("{name:'a',value:1}")
            .unwrap();

        assert_eq!(outcome.json, r#"{"name":"a","value":1}"#);
        assert_eq!(
            outcome.fixes,
            vec![JsonFix::UnquotedKeys, JsonFix::SingleQuotes]
        );
    }

    #[test]
    fn test_fix_smart_quotes() {
        assert_eq!(
            repaired_value("{\u{201C}name\u{201D}: \u{201C}Alice\u{201D}}"),
            json!({"name": "Alice"})
        );
    }

    #[test]
    fn test_fix_unclosed_braces() {
        assert_eq!(
            close_unclosed_braces(r#"{"a": [1, {"b": 2"#).as_deref(),
            Some(r#"{"a": [1, {"b": 2}]}"#)
        );
        assert_eq!(repaired_value(r#"{"a": "b"#), json!({"a": "b"}));
    }

    #[test]
    fn test_fix_unclosed_with_trailing_comma() {
        assert_eq!(repaired_value("[1,2,"), json!([1, 2]));
    }

    #[test]
    fn test_fix_missing_commas() {
        assert_eq!(
            repaired_value(r#"{"a": "x" "b": "y"}"#),
            json!({"a": "x", "b": "y"})
        );
        assert_eq!(repaired_value(r#"[{"a":1}{"b":2}]"#), json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn test_fix_hex_numbers() {
        assert_eq!(repaired_value(r#"{"age": 0x1E}"#), json!({"age": 30}));
        assert_eq!(convert_hex_numbers("[0xZZ]").as_deref(), None);
    }

    #[test]
    fn test_fix_unquoted_values() {
        assert_eq!(
            repaired_value("{status: active, count: 3}"),
            json!({"status": "active", "count": 3})
        );
    }

    #[test]
    fn test_valid_json_is_unchanged() {
        let outcome = DurableJsonRepairer::default().repair(" [1,2] ").unwrap();
        assert_eq!(outcome, RepairOutcome::unchanged("[1,2]"));
    }

    #[test]
    fn test_empty_input() {
        let err = DurableJsonRepairer::default().repair("   ").unwrap_err();
        assert!(matches!(err, RepairError::EmptyInput));
    }

    #[test]
    fn test_prose_is_unrepairable() {
        let err = DurableJsonRepairer::default()
            .repair("justsomewords")
            .unwrap_err();
        assert!(matches!(err, RepairError::Unrepairable { attempts: 0 }));
    }

    #[test]
    fn test_zero_attempt_budget() {
        let repairer = DurableJsonRepairer::new(0);
        assert_eq!(repairer.max_attempts(), 0);

        let err = repairer.repair("{'a': 1}").unwrap_err();
        assert!(matches!(err, RepairError::Unrepairable { attempts: 0 }));
    }

    #[test]
    fn test_attempt_budget_counts_applied_pipelines_only() {
        // Single quotes alone fail, then unquoted keys alone fail, then the
        // pair succeeds on the third counted attempt.
        let repairer = DurableJsonRepairer::new(2);
        let err = repairer.repair("{name:'a'}").unwrap_err();
        assert!(matches!(err, RepairError::Unrepairable { attempts: 2 }));

        let repairer = DurableJsonRepairer::new(3);
        assert!(repairer.repair("{name:'a'}").is_ok());
    }
}
