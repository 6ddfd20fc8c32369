//! JSON classification with a lenient repair fallback.

use serde_json::Value;
use tracing::{debug, trace};

use super::{Classification, ClassifyStrategy};
use crate::{
    error::Result,
    normalize::{strip_for_json, strip_special_chars},
    repair::{parse_strict, DurableJsonRepairer, JsonRepairer},
};

/// Strategy that classifies a selection as JSON.
///
/// The selection is whitespace-stripped and parsed strictly. If that fails,
/// the stripped text is denoised with [`strip_special_chars`] and handed to
/// the configured [`JsonRepairer`]; its output must still parse strictly.
///
/// # Examples
///
/// ```
/// use selection_props::classify::{Classification, ClassifyStrategy, JsonClassifier};
/// use serde_json::json;
///
/// let classifier = JsonClassifier::default();
/// assert_eq!(
///     classifier.classify("{name: 'a', value: 1,}"),
///     Classification::Json(json!({"name": "a", "value": 1}))
/// );
/// ```
#[derive(Debug)]
pub struct JsonClassifier {
    repairer: Box<dyn JsonRepairer>,
}

impl Default for JsonClassifier {
    fn default() -> Self {
        Self::with_repairer(DurableJsonRepairer::default())
    }
}

impl JsonClassifier {
    /// Creates a classifier using the built-in durable repairer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier using a custom repair collaborator.
    pub fn with_repairer(repairer: impl JsonRepairer + 'static) -> Self {
        Self {
            repairer: Box::new(repairer),
        }
    }

    /// Returns the name of the configured repairer.
    #[inline]
    pub fn repairer_name(&self) -> &'static str {
        self.repairer.name()
    }

    /// Classifies text that strict parsing already rejected.
    ///
    /// `stripped` is expected to have been through [`strip_for_json`].
    /// Failures are logged and collapse to [`Classification::None`].
    pub fn classify_lenient(&self, stripped: &str) -> Classification {
        match self.repair(stripped) {
            Ok(value) => Classification::Json(value),
            Err(err) => {
                debug!(repairer = self.repairer.name(), error = %err, "lenient JSON repair failed");
                Classification::None
            }
        }
    }

    fn repair(&self, stripped: &str) -> Result<Value> {
        let denoised = strip_special_chars(stripped);
        let outcome = self.repairer.repair(&denoised)?;
        trace!(
            repairer = self.repairer.name(),
            fixes = ?outcome.fixes,
            "repaired selection"
        );
        Ok(parse_strict(&outcome.json)?)
    }
}

impl ClassifyStrategy for JsonClassifier {
    #[inline]
    fn name(&self) -> &'static str {
        "json"
    }

    fn classify(&self, text: &str) -> Classification {
        let stripped = strip_for_json(text);

        match parse_strict(&stripped) {
            Ok(value) => Classification::Json(value),
            Err(err) => {
                trace!(error = %err, "strict JSON parse failed, trying repair");
                self.classify_lenient(&stripped)
            }
        }
    }

    #[inline]
    fn priority(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{error::RepairError, repair::RepairOutcome};

    /// Returns a fixed string and records what it was asked to repair.
    #[derive(Debug, Default)]
    struct FixedRepairer {
        output: &'static str,
        calls: Arc<AtomicUsize>,
        seen: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl JsonRepairer for FixedRepairer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn repair(&self, text: &str) -> std::result::Result<RepairOutcome, RepairError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(text.to_string());
            Ok(RepairOutcome::fixed(self.output, Vec::new()))
        }
    }

    #[derive(Debug)]
    struct FailingRepairer;

    impl JsonRepairer for FailingRepairer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn repair(&self, _text: &str) -> std::result::Result<RepairOutcome, RepairError> {
            Err(RepairError::Custom("boom".to_string()))
        }
    }

    #[test]
    fn test_strict_json_object() {
        let classifier = JsonClassifier::default();
        assert_eq!(
            classifier.classify("{\n  \"a\": 1,\n  \"b\": [true]\n}"),
            Classification::Json(json!({"a": 1, "b": [true]}))
        );
    }

    #[test]
    fn test_strict_json_with_trailing_semicolon() {
        let classifier = JsonClassifier::default();
        assert_eq!(
            classifier.classify("[1, 2, 3];"),
            Classification::Json(json!([1, 2, 3]))
        );
    }

    #[test]
    fn test_strict_scalar_is_returned_as_is() {
        let classifier = JsonClassifier::default();
        assert_eq!(classifier.classify("5"), Classification::Json(json!(5)));
        assert_eq!(
            classifier.classify("\"hello\""),
            Classification::Json(json!("hello"))
        );
    }

    #[test]
    fn test_strict_success_skips_repairer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let classifier = JsonClassifier::with_repairer(FixedRepairer {
            output: "[]",
            calls: Arc::clone(&calls),
            ..Default::default()
        });

        classifier.classify("[1]");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_repairer_receives_denoised_text() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let classifier = JsonClassifier::with_repairer(FixedRepairer {
            output: r#"{"ok": true}"#,
            seen: Arc::clone(&seen),
            ..Default::default()
        });

        let result = classifier.classify("{ a: fn(x), b: 1, };");

        assert_eq!(result, Classification::Json(json!({"ok": true})));
        assert_eq!(*seen.lock().unwrap(), vec!["{a:fntag,b:1}".to_string()]);
    }

    #[test]
    fn test_malformed_repair_output_is_none() {
        let classifier = JsonClassifier::with_repairer(FixedRepairer {
            output: "{still broken",
            ..Default::default()
        });
        assert_eq!(classifier.classify("{oops"), Classification::None);
    }

    #[test]
    fn test_repair_error_is_none() {
        let classifier = JsonClassifier::with_repairer(FailingRepairer);
        assert_eq!(classifier.repairer_name(), "failing");
        assert_eq!(classifier.classify("{a: 1}"), Classification::None);
    }

    #[test]
    fn test_prose_is_none() {
        let classifier = JsonClassifier::new();
        assert_eq!(classifier.classify("just some words"), Classification::None);
    }

    #[test]
    fn test_lenient_unquoted_array_items() {
        let classifier = JsonClassifier::new();
        assert_eq!(
            classifier.classify("['a', 'b', 'c',]"),
            Classification::Json(json!(["a", "b", "c"]))
        );
    }
}
