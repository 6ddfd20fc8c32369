//! HTML fragment classification.

use tracing::{debug, trace};

use super::{Classification, ClassifyStrategy};
use crate::{
    dom::{ElementNode, FragmentParser},
    error::{ClassifyError, Result},
    normalize::strip_for_tag,
};

/// Id of the synthetic element wrapped around the selected fragment.
pub const VIRTUAL_ROOT_ID: &str = "_virtualDom";

/// Wraps a fragment in the synthetic root element.
///
/// # Examples
///
/// ```
/// use selection_props::classify::wrap_fragment;
///
/// assert_eq!(wrap_fragment("<p></p>"), r#"<div id="_virtualDom"><p></p></div>"#);
/// ```
pub fn wrap_fragment(fragment: &str) -> String {
    format!(r#"<div id="{VIRTUAL_ROOT_ID}">{fragment}</div>"#)
}

/// Strategy that classifies a selection as an HTML fragment.
///
/// The cheap gate runs on whitespace-stripped text: it must start with `<`
/// and end with `>`. The parse itself runs on the original text so inner
/// whitespace and text content reach the parser untouched.
#[derive(Debug)]
pub struct HtmlClassifier {
    parser: Option<Box<dyn FragmentParser>>,
}

impl Default for HtmlClassifier {
    #[cfg(feature = "html")]
    fn default() -> Self {
        Self::with_parser(crate::dom::ScraperFragmentParser)
    }

    #[cfg(not(feature = "html"))]
    fn default() -> Self {
        Self::without_parser()
    }
}

impl HtmlClassifier {
    /// Creates a classifier using the default fragment parser, if the
    /// `html` feature provides one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier using a custom fragment parser.
    pub fn with_parser(parser: impl FragmentParser + 'static) -> Self {
        Self {
            parser: Some(Box::new(parser)),
        }
    }

    /// Creates a classifier that rejects everything.
    pub fn without_parser() -> Self {
        Self { parser: None }
    }

    /// Whether a fragment parser is configured.
    #[inline]
    pub fn has_parser(&self) -> bool {
        self.parser.is_some()
    }

    /// Cheap check run before any parsing.
    ///
    /// # Examples
    ///
    /// ```
    /// use selection_props::classify::HtmlClassifier;
    ///
    /// assert!(HtmlClassifier::looks_like_tag("  <div>\n</div>\n"));
    /// assert!(!HtmlClassifier::looks_like_tag("text <b>bold</b>"));
    /// ```
    pub fn looks_like_tag(text: &str) -> bool {
        let stripped = strip_for_tag(text);
        stripped.starts_with('<') && stripped.ends_with('>')
    }

    fn parse_children(&self, text: &str) -> Result<Vec<ElementNode>> {
        if !Self::looks_like_tag(text) {
            return Err(ClassifyError::NotApplicable("not an HTML tag"));
        }

        let parser = self
            .parser
            .as_ref()
            .ok_or(ClassifyError::NotApplicable("no fragment parser configured"))?;

        let root = parser.parse_fragment(&wrap_fragment(text), VIRTUAL_ROOT_ID)?;
        Ok(root.children)
    }
}

impl ClassifyStrategy for HtmlClassifier {
    #[inline]
    fn name(&self) -> &'static str {
        "html"
    }

    fn classify(&self, text: &str) -> Classification {
        match self.parse_children(text) {
            Ok(children) => Classification::Html(children),
            Err(ClassifyError::NotApplicable(reason)) => {
                trace!(reason, "skipping HTML classification");
                Classification::None
            }
            Err(err) => {
                debug!(error = %err, "HTML fragment parsing failed");
                Classification::None
            }
        }
    }

    #[inline]
    fn priority(&self) -> u8 {
        2
    }
}
