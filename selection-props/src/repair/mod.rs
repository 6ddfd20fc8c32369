//! Lenient JSON repair.
//!
//! The classifier treats repair as a collaborator behind the [`JsonRepairer`]
//! trait: given noisy near-JSON it returns corrected JSON text or an error.
//! [`DurableJsonRepairer`] is the built-in implementation.

mod durable;

pub use durable::DurableJsonRepairer;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RepairError;

/// Parses `text` as strict JSON with no nesting limit.
///
/// Numbers keep their source text, so values outside the `f64` range still
/// parse. Deep nesting grows the stack on the heap instead of failing.
///
/// # Examples
///
/// ```
/// use selection_props::repair::parse_strict;
///
/// assert!(parse_strict("[1e400]").is_ok());
/// assert!(parse_strict("[1] trailing").is_err());
/// ```
pub fn parse_strict(text: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// A collaborator that turns near-JSON into JSON text.
///
/// Implementations only promise a best effort. The caller re-parses the
/// returned [`RepairOutcome::json`] and discards it if it is still invalid.
pub trait JsonRepairer: Send + Sync + std::fmt::Debug {
    /// Returns the name of this repairer for debugging.
    fn name(&self) -> &'static str;

    /// Attempts to repair `text` into valid JSON.
    fn repair(&self, text: &str) -> Result<RepairOutcome, RepairError>;
}

/// Corrected JSON text plus the fixes that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Repaired JSON text.
    pub json: String,
    /// Fixes applied, in order. Empty when the input was already valid.
    pub fixes: Vec<JsonFix>,
}

impl RepairOutcome {
    /// Wraps text that needed no repair.
    #[inline]
    pub fn unchanged(json: impl Into<String>) -> Self {
        Self {
            json: json.into(),
            fixes: Vec::new(),
        }
    }

    /// Wraps repaired text.
    #[inline]
    pub fn fixed(json: impl Into<String>, fixes: Vec<JsonFix>) -> Self {
        Self {
            json: json.into(),
            fixes,
        }
    }
}

/// Textual fixes the durable repairer knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonFix {
    /// Added quotes around unquoted object keys.
    UnquotedKeys,
    /// Removed trailing commas.
    TrailingCommas,
    /// Converted single quotes to double quotes.
    SingleQuotes,
    /// Added missing commas between items.
    MissingCommas,
    /// Closed unclosed braces or brackets.
    UnclosedBraces,
    /// Normalized Unicode smart/curly quotes.
    SmartQuotes,
    /// Converted hex numbers to decimal.
    HexNumbers,
    /// Added quotes around unquoted values.
    UnquotedValues,
}

impl JsonFix {
    /// Returns a human-readable description of this fix.
    pub const fn description(self) -> &'static str {
        match self {
            Self::UnquotedKeys => "added quotes around object keys",
            Self::TrailingCommas => "removed trailing commas",
            Self::SingleQuotes => "converted single quotes to double quotes",
            Self::MissingCommas => "added missing commas",
            Self::UnclosedBraces => "closed unclosed braces/brackets",
            Self::SmartQuotes => "normalized smart/curly quotes",
            Self::HexNumbers => "converted hex numbers to decimal",
            Self::UnquotedValues => "added quotes around unquoted values",
        }
    }

    /// Applies this fix, returning `None` when it changed nothing.
    pub fn apply(self, input: &str) -> Option<String> {
        match self {
            Self::UnquotedKeys => durable::quote_unquoted_keys(input),
            Self::TrailingCommas => durable::remove_trailing_commas(input),
            Self::SingleQuotes => durable::convert_single_quotes(input),
            Self::MissingCommas => durable::insert_missing_commas(input),
            Self::UnclosedBraces => durable::close_unclosed_braces(input),
            Self::SmartQuotes => durable::normalize_smart_quotes(input),
            Self::HexNumbers => durable::convert_hex_numbers(input),
            Self::UnquotedValues => durable::quote_unquoted_values(input),
        }
    }
}
