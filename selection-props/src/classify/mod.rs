//! Strategies that decide what kind of structured data a selection holds.

mod html;
mod json;

pub use html::{wrap_fragment, HtmlClassifier, VIRTUAL_ROOT_ID};
pub use json::JsonClassifier;
use serde_json::Value;

use crate::dom::ElementNode;

/// What a selection was recognised as.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Parsed (possibly after repair) as JSON.
    Json(Value),
    /// Parsed as an HTML fragment; holds the fragment's top-level elements.
    Html(Vec<ElementNode>),
    /// Neither classifier applied.
    None,
}

impl Classification {
    /// Whether the inspector should stop at this result.
    ///
    /// JSON scalars carry no shape, so they fall through to the next
    /// strategy just like [`Classification::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use selection_props::classify::Classification;
    /// use serde_json::json;
    ///
    /// assert!(Classification::Json(json!([1, 2])).is_usable());
    /// assert!(!Classification::Json(json!(5)).is_usable());
    /// assert!(!Classification::None.is_usable());
    /// ```
    pub fn is_usable(&self) -> bool {
        match self {
            Self::Json(value) => value.is_array() || value.is_object(),
            Self::Html(_) => true,
            Self::None => false,
        }
    }

    /// Short name of the variant, for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Html(_) => "html",
            Self::None => "none",
        }
    }
}

/// Trait for strategies that classify selected text.
///
/// Strategies never fail: anything that goes wrong inside one is reported
/// as [`Classification::None`].
pub trait ClassifyStrategy: Send + Sync + std::fmt::Debug {
    /// Returns the name of this strategy for debugging.
    fn name(&self) -> &'static str;

    /// Classifies the raw selected text.
    fn classify(&self, text: &str) -> Classification;

    /// Returns the priority of this strategy.
    ///
    /// Lower values are tried first. JSON always outranks HTML.
    fn priority(&self) -> u8;
}
