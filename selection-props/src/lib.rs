//! # selection-props
//!
//! Tells an editor what kind of structured data is currently selected and
//! how big it is.
//!
//! A selection is classified as:
//! - JSON, parsed strictly or after lenient repair of near-JSON
//!   (unquoted keys, single quotes, trailing commas, unclosed braces)
//! - an HTML fragment, parsed inside a synthetic root element
//! - nothing, which is never an error
//!
//! ## Quick Start
//!
//! ```rust
//! use selection_props::get_details;
//!
//! let details = get_details("{name: 'a', value: 1,}");
//! assert_eq!(details.object_size, Some(2));
//!
//! let details = get_details("just some prose");
//! assert!(details.is_empty());
//! ```
//!
//! ## Selections
//!
//! Editor selections are summarized with line and word counts alongside
//! the data metrics:
//!
//! ```rust
//! use selection_props::{
//!     get_selection_details,
//!     selection::{Position, SelectionRange},
//! };
//!
//! let ranges = [SelectionRange::new(
//!     Position::new(0, 0),
//!     Position::new(0, 9),
//!     "[1, 2, 3]",
//! )];
//!
//! let summary = get_selection_details(&ranges).unwrap();
//! assert_eq!(summary.to_string(), "Lines : 1, Words : 0, Array Length : 3");
//! ```
//!
//! ## Custom Collaborators
//!
//! The repair engine and the HTML parser sit behind traits, so either can
//! be swapped:
//!
//! ```rust
//! use selection_props::{
//!     classify::{HtmlClassifier, JsonClassifier},
//!     inspector::SelectionInspector,
//!     repair::DurableJsonRepairer,
//! };
//!
//! let inspector = SelectionInspector::from_parts(
//!     JsonClassifier::with_repairer(DurableJsonRepairer::new(4)),
//!     HtmlClassifier::without_parser(),
//! );
//! assert_eq!(inspector.inspect("<p></p><p></p>").nodes, None);
//! ```

pub mod classify;
pub mod dom;
pub mod error;
pub mod inspector;
pub mod measure;
pub mod normalize;
pub mod repair;
pub mod selection;

use inspector::SelectionInspector;
use measure::DataDetails;
use once_cell::sync::Lazy;
use selection::{SelectionRange, SelectionSummary};

static DEFAULT_INSPECTOR: Lazy<SelectionInspector> = Lazy::new(SelectionInspector::new);

/// Measures the shape of a selected text.
///
/// Uses the default JSON and HTML classifiers. Never fails: text that is
/// neither JSON nor HTML yields empty details.
///
/// # Examples
///
/// ```
/// use selection_props::get_details;
///
/// assert_eq!(get_details("[1, 2, 3]").array_length, Some(3));
/// assert!(get_details("5").is_empty());
/// ```
pub fn get_details(text: &str) -> DataDetails {
    DEFAULT_INSPECTOR.inspect(text)
}

/// Summarizes an editor selection with the default classifiers.
///
/// Returns `None` when there are no ranges or the selected text is empty.
pub fn get_selection_details(ranges: &[SelectionRange]) -> Option<SelectionSummary> {
    DEFAULT_INSPECTOR.summarize(ranges)
}
