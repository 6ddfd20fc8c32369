//! Editor selections: line and word counts, and the summary report.
//!
//! The host editor hands over its selection ranges; nothing here talks to
//! an editor directly.

use std::{collections::HashSet, fmt};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{measure::DataDetails, normalize::trim_whitespace};

/// Anything that is not an ASCII letter or a space.
static NON_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z ]").expect("Invalid non-letter regex pattern"));

/// Two or more consecutive spaces.
static SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("Invalid space run regex pattern"));

/// Zero-based position in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based character offset within the line.
    pub character: u32,
}

impl Position {
    /// Creates a position.
    #[inline]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// One selection range and the text it covers.
///
/// `start` is never after `end`. A range whose ends coincide is a bare
/// cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRange {
    /// Start of the range.
    pub start: Position,
    /// End of the range.
    pub end: Position,
    /// Text covered by the range.
    #[serde(default)]
    pub text: String,
}

impl SelectionRange {
    /// Creates a range covering `text`.
    pub fn new(start: Position, end: Position, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Creates an empty range at `position`.
    pub fn cursor(position: Position) -> Self {
        Self::new(position, position, "")
    }

    /// Whether this range is a bare cursor.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Joins the text of every range with a single space, then trims.
///
/// # Examples
///
/// ```
/// use selection_props::selection::{join_selected_text, Position, SelectionRange};
///
/// let ranges = [
///     SelectionRange::new(Position::new(0, 0), Position::new(0, 3), "foo"),
///     SelectionRange::cursor(Position::new(1, 0)),
///     SelectionRange::new(Position::new(2, 0), Position::new(2, 3), "bar"),
/// ];
/// assert_eq!(join_selected_text(&ranges), "foo  bar");
/// ```
pub fn join_selected_text(ranges: &[SelectionRange]) -> String {
    let joined = ranges
        .iter()
        .map(|range| range.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    trim_whitespace(&joined).to_string()
}

/// Counts selected lines.
///
/// Returns 0 when every range is a bare cursor. Otherwise each range
/// contributes the lines it spans, plus one for its start line unless an
/// earlier range already started on that line.
///
/// # Examples
///
/// ```
/// use selection_props::selection::{line_count, Position, SelectionRange};
///
/// let ranges = [
///     SelectionRange::new(Position::new(4, 0), Position::new(6, 2), "..."),
///     SelectionRange::new(Position::new(4, 8), Position::new(4, 12), "..."),
/// ];
/// assert_eq!(line_count(&ranges), 3);
/// ```
pub fn line_count(ranges: &[SelectionRange]) -> usize {
    if ranges.iter().all(SelectionRange::is_empty) {
        return 0;
    }

    let mut start_lines = HashSet::new();
    ranges
        .iter()
        .map(|range| {
            let spanned = range.end.line.saturating_sub(range.start.line) as usize;
            let first_on_line = start_lines.insert(range.start.line);
            spanned + usize::from(first_on_line)
        })
        .sum()
}

/// Counts words of two or more ASCII letters.
///
/// Every non-letter splits words, so `data-size-count` is three words.
///
/// # Examples
///
/// ```
/// use selection_props::selection::word_count;
///
/// assert_eq!(word_count("data-size-count"), 3);
/// assert_eq!(word_count("a"), 0);
/// ```
pub fn word_count(text: &str) -> usize {
    let trimmed = trim_whitespace(text);
    if trimmed.is_empty() {
        return 0;
    }

    let letters = NON_LETTER.replace_all(trimmed, " ");
    let collapsed = SPACE_RUN.replace_all(&letters, " ");
    let collapsed = collapsed.replacen("\n ", "\n", 1);

    collapsed
        .split(' ')
        .map(str::trim)
        .filter(|word| word.len() >= 2)
        .count()
}

/// Everything reported about the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    /// Number of selected lines.
    pub lines: usize,
    /// Number of selected words.
    pub words: usize,
    /// Shape of the selected data.
    pub data: DataDetails,
}

impl SelectionSummary {
    /// Labelled report entries in display order.
    ///
    /// Lines and words are always present. Data metrics appear only when
    /// set, including when set to zero.
    pub fn report_entries(&self) -> Vec<(&'static str, usize)> {
        let metrics = [
            ("Array Length", self.data.array_length),
            ("Object Size", self.data.object_size),
            ("Nodes", self.data.nodes),
            ("Child Nodes", self.data.child_nodes),
        ];

        let mut entries = vec![("Lines", self.lines), ("Words", self.words)];
        entries.extend(
            metrics
                .into_iter()
                .filter_map(|(label, value)| value.map(|value| (label, value))),
        );
        entries
    }
}

impl fmt::Display for SelectionSummary {
    /// Renders `Label : value` entries separated by `", "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, value)) in self.report_entries().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label} : {value}")?;
        }
        Ok(())
    }
}
