//! Text normalization applied before classification.
//!
//! All three passes are total: they never fail and always return a new
//! string. They are ordered text substitutions and nothing more, so they can
//! (and do) mangle legitimate content that happens to contain the characters
//! they remove.

use once_cell::sync::Lazy;
use regex::Regex;

/// Any Unicode whitespace character, or a byte-order mark.
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\x{FEFF}]").expect("Invalid whitespace regex pattern"));

/// Byte-order mark, which editors treat as whitespace.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// A single `,` or `;` at the very end of the text.
static TRAILING_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;]$").expect("Invalid trailing separator regex pattern"));

// The group patterns below stop at line terminators, like `.` does in the
// editor's regex dialect.

/// Shortest `(...)` group.
static PAREN_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\([^\n\r\x{2028}\x{2029}]*?\)").expect("Invalid paren group regex pattern")
});

/// Shortest `<...>` group.
static ANGLE_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<[^\n\r\x{2028}\x{2029}]*?>").expect("Invalid angle group regex pattern")
});

/// Shortest `${...}` template placeholder.
static TEMPLATE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$\{[^\n\r\x{2028}\x{2029}]*?\}")
        .expect("Invalid template placeholder regex pattern")
});

/// Characters deleted by [`strip_special_chars`].
///
/// `,` `:` `'` `"` and the brackets are structural in JSON and are kept.
pub const SPECIAL_CHARS: [char; 22] = [
    '~', '!', '@', '#', '$', '%', '^', '&', '*', '_', '+', '-', '=', '(', ')', ';', '/', '|', '<',
    '>', '.', '?',
];

/// Trims whitespace and byte-order marks from both ends.
///
/// # Examples
///
/// ```
/// use selection_props::normalize::trim_whitespace;
///
/// assert_eq!(trim_whitespace("\u{FEFF} [1]\n"), "[1]");
/// ```
pub fn trim_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Removes every whitespace character so the text can be tested for
/// HTML-likeness.
///
/// # Examples
///
/// ```
/// use selection_props::normalize::strip_for_tag;
///
/// assert_eq!(strip_for_tag("  <div>\n  <p></p>\n</div> "), "<div><p></p></div>");
/// ```
pub fn strip_for_tag(text: &str) -> String {
    let stripped = trim_whitespace(text).replace('\n', "");
    WHITESPACE.replace_all(&stripped, "").into_owned()
}

/// Removes every whitespace character and one trailing `,` or `;`.
///
/// # Examples
///
/// ```
/// use selection_props::normalize::strip_for_json;
///
/// assert_eq!(strip_for_json("{ \"a\": 1 },\n"), "{\"a\":1}");
/// assert_eq!(strip_for_json("[1, 2];"), "[1,2]");
/// ```
pub fn strip_for_json(text: &str) -> String {
    let stripped = trim_whitespace(text).replace('\n', "");
    let stripped = WHITESPACE.replace_all(&stripped, "");
    let stripped = stripped.replace(['\r', '\t'], "");
    TRAILING_SEPARATOR.replace(&stripped, "").into_owned()
}

/// Best-effort denoising of code-ish text into something closer to JSON.
///
/// The steps run in a fixed order and must stay that way; reordering them
/// changes which snippets survive:
///
/// 1. `,]` → `]` and `,}` → `}`
/// 2. `(...)` → `tag`
/// 3. `<...>` → `tag`
/// 4. `${...}` → `text`
/// 5. delete every character in [`SPECIAL_CHARS`]
/// 6. backtick → `'`
/// 7. trim, then [`strip_for_json`]
///
/// # Examples
///
/// ```
/// use selection_props::normalize::strip_special_chars;
///
/// assert_eq!(strip_special_chars("{a: fn(x), b: `${y}`,}"), "{a:fntag,b:'text'}");
/// ```
pub fn strip_special_chars(text: &str) -> String {
    let text = text.replace(",]", "]").replace(",}", "}");
    let text = PAREN_GROUP.replace_all(&text, "tag");
    let text = ANGLE_GROUP.replace_all(&text, "tag");
    let text = TEMPLATE_PLACEHOLDER.replace_all(&text, "text");
    let text = text.replace(SPECIAL_CHARS, "").replace('`', "'");
    strip_for_json(trim_whitespace(&text))
}
