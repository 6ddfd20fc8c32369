//! Inspector that runs classification strategies over a selection.

use tracing::{debug, trace};

use crate::{
    classify::{Classification, ClassifyStrategy, HtmlClassifier, JsonClassifier},
    measure::{measure, DataDetails},
    selection::{join_selected_text, line_count, word_count, SelectionRange, SelectionSummary},
};

/// Runs classification strategies in priority order and measures the first
/// usable result.
///
/// # Examples
///
/// ```
/// use selection_props::inspector::SelectionInspector;
///
/// let inspector = SelectionInspector::default();
/// let details = inspector.inspect(r#"{"a": 1, "b": 2}"#);
/// assert_eq!(details.object_size, Some(2));
/// ```
#[derive(Debug)]
pub struct SelectionInspector {
    /// Classification strategies in priority order.
    strategies: Vec<Box<dyn ClassifyStrategy>>,
}

impl Default for SelectionInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionInspector {
    /// Creates an inspector with the JSON and HTML classifiers.
    pub fn new() -> Self {
        Self::from_parts(JsonClassifier::default(), HtmlClassifier::default())
    }

    /// Creates an inspector from configured JSON and HTML classifiers.
    pub fn from_parts(json: JsonClassifier, html: HtmlClassifier) -> Self {
        Self::with_strategies(vec![Box::new(json), Box::new(html)])
    }

    /// Creates an inspector with custom strategies.
    ///
    /// Strategies will be sorted by priority automatically.
    pub fn with_strategies(mut strategies: Vec<Box<dyn ClassifyStrategy>>) -> Self {
        strategies.sort_by_key(|s| s.priority());
        Self { strategies }
    }

    /// Number of configured strategies.
    #[inline]
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Strategy names in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Returns the first usable classification, or [`Classification::None`].
    pub fn classify(&self, text: &str) -> Classification {
        for strategy in &self.strategies {
            let classification = strategy.classify(text);
            if classification.is_usable() {
                trace!(
                    strategy = strategy.name(),
                    kind = classification.kind(),
                    "classified selection"
                );
                return classification;
            }
            trace!(
                strategy = strategy.name(),
                kind = classification.kind(),
                "classification not usable, trying next strategy"
            );
        }
        Classification::None
    }

    /// Measures the shape of the selected text.
    ///
    /// Never fails: text that no strategy recognises yields empty details.
    pub fn inspect(&self, text: &str) -> DataDetails {
        measure(&self.classify(text))
    }

    /// Summarizes the current selection.
    ///
    /// Returns `None` when there are no ranges or the joined selected text
    /// is empty after trimming.
    pub fn summarize(&self, ranges: &[SelectionRange]) -> Option<SelectionSummary> {
        if ranges.is_empty() {
            return None;
        }

        let text = join_selected_text(ranges);
        if text.is_empty() {
            debug!(ranges = ranges.len(), "selection holds no text");
            return None;
        }

        Some(SelectionSummary {
            lines: line_count(ranges),
            words: word_count(&text),
            data: self.inspect(&text),
        })
    }
}
