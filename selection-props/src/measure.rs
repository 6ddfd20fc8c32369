//! Shape metrics for a classified selection.

use serde::{Deserialize, Serialize};

use crate::classify::Classification;

/// Shape metrics reported for a selection.
///
/// Every field is optional, and an absent field means something different
/// from `Some(0)`: absent fields are left out of reports entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataDetails {
    /// Length of a JSON array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_length: Option<usize>,
    /// Number of entries in a JSON object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_size: Option<usize>,
    /// Number of top-level elements in an HTML fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<usize>,
    /// Number of element children of the fragment's first top-level element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_nodes: Option<usize>,
}

impl DataDetails {
    /// Whether no metric is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Computes the shape metrics for a classification.
///
/// HTML metrics are only reported when the fragment has more than one
/// top-level element; a single selected tag reports nothing, not `nodes: 1`.
///
/// # Examples
///
/// ```
/// use selection_props::classify::Classification;
/// use selection_props::measure::measure;
/// use serde_json::json;
///
/// let details = measure(&Classification::Json(json!([1, 2, 3])));
/// assert_eq!(details.array_length, Some(3));
/// assert_eq!(details.object_size, None);
/// ```
pub fn measure(classification: &Classification) -> DataDetails {
    match classification {
        Classification::Json(value) => DataDetails {
            array_length: value.as_array().map(Vec::len),
            object_size: value.as_object().map(|object| object.len()),
            ..DataDetails::default()
        },
        Classification::Html(children) if children.len() > 1 => DataDetails {
            nodes: Some(children.len()),
            child_nodes: Some(children[0].child_count()),
            ..DataDetails::default()
        },
        Classification::Html(_) | Classification::None => DataDetails::default(),
    }
}
