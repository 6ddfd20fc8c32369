//! Element trees for HTML fragments.
//!
//! The HTML classifier only needs element names and element children, so a
//! parsed document is copied into a small owned [`ElementNode`] tree. Text
//! and comment nodes are dropped.

#[cfg(feature = "html")]
use scraper::{ElementRef, Html, Selector};

use crate::error::FragmentError;

/// Maximum element depth copied out of a parsed document.
pub const MAX_NODE_DEPTH: usize = 64;

/// An element and its element children, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    /// Lowercase tag name.
    pub name: String,
    /// Direct element children.
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Creates a childless element.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Creates an element with the given children.
    #[inline]
    pub fn with_children(name: impl Into<String>, children: Vec<ElementNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Returns the number of direct element children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// A collaborator that builds a DOM from HTML text.
///
/// `html` is a complete wrapper element around the selected fragment and
/// `root_id` is the wrapper's `id`. Implementations return the wrapper
/// element itself.
pub trait FragmentParser: Send + Sync + std::fmt::Debug {
    /// Returns the name of this parser for debugging.
    fn name(&self) -> &'static str;

    /// Parses `html` and returns the element whose id is `root_id`.
    fn parse_fragment(&self, html: &str, root_id: &str) -> Result<ElementNode, FragmentError>;
}

/// [`FragmentParser`] backed by `scraper` (html5ever).
///
/// Parses with full-document semantics, the way a browser would treat the
/// text as a page body, so misplaced tags are dropped or moved exactly as
/// the HTML5 tree builder dictates.
///
/// # Examples
///
/// ```
/// use selection_props::dom::{FragmentParser, ScraperFragmentParser};
///
/// let root = ScraperFragmentParser
///     .parse_fragment(r#"<div id="root"><p></p><p></p></div>"#, "root")
///     .unwrap();
/// assert_eq!(root.child_count(), 2);
/// ```
#[cfg(feature = "html")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperFragmentParser;

#[cfg(feature = "html")]
impl FragmentParser for ScraperFragmentParser {
    #[inline]
    fn name(&self) -> &'static str {
        "scraper"
    }

    fn parse_fragment(&self, html: &str, root_id: &str) -> Result<ElementNode, FragmentError> {
        let document = Html::parse_document(html);

        let selector_text = format!("#{root_id}");
        let selector = Selector::parse(&selector_text).map_err(|e| FragmentError::Selector {
            selector: selector_text.clone(),
            message: format!("{e:?}"),
        })?;

        let root = document
            .select(&selector)
            .next()
            .ok_or_else(|| FragmentError::root_not_found(root_id))?;

        Ok(copy_element(root, 0))
    }
}

#[cfg(feature = "html")]
fn copy_element(element: ElementRef<'_>, depth: usize) -> ElementNode {
    let children = if depth >= MAX_NODE_DEPTH {
        Vec::new()
    } else {
        element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|child| copy_element(child, depth + 1))
            .collect()
    };

    ElementNode::with_children(element.value().name(), children)
}
