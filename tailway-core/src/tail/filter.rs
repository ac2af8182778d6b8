use crate::markup::escape_html;

/// Marker appended after every emitted line.
pub const LINE_BREAK: &str = "<br>";

/// Number of leading characters wrapped by the highlight stage.
pub const HIGHLIGHT_PREFIX_CHARS: usize = 10;

const HIGHLIGHT_OPEN: &str = "<span style='color:red;font-weight:bold'>";
const HIGHLIGHT_CLOSE: &str = "</span>";

/// Per-request line filters. Every field is optional; `None` means no constraint.
///
/// Lengths and columns count characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub start_column: Option<usize>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub must_contain: Option<String>,
    pub must_not_contain: Option<String>,
    pub truncate_to: Option<usize>,
    pub highlight_prefix: bool,
}

/// A pipeline stage: transform the line, or drop it by returning `None`.
pub type Stage = fn(&FilterSpec, String) -> Option<String>;

/// The pipeline, in application order. The order is observable: columns are
/// skipped before lengths are measured, and lines are truncated only after every
/// rejection rule ran, then highlighted last.
pub const STAGES: [(&str, Stage); 7] = [
    ("column_skip", column_skip),
    ("min_length", min_length),
    ("max_length", max_length),
    ("must_contain", must_contain),
    ("must_not_contain", must_not_contain),
    ("truncate", truncate),
    ("highlight", highlight),
];

impl FilterSpec {
    /// Run `line` through every stage, short-circuiting on the first rejection.
    pub fn apply(&self, line: String) -> Option<String> {
        STAGES
            .iter()
            .try_fold(line, |line, (_, stage)| stage(self, line))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub(crate) fn column_skip(spec: &FilterSpec, line: String) -> Option<String> {
    match spec.start_column {
        Some(column) if column > 0 => {
            if char_len(&line) > column {
                Some(split_at_char(&line, column).1.to_string())
            } else {
                // Too short to have the requested column.
                None
            }
        }
        _ => Some(line),
    }
}

pub(crate) fn min_length(spec: &FilterSpec, line: String) -> Option<String> {
    match spec.min_length {
        Some(min) if char_len(&line) < min => None,
        _ => Some(line),
    }
}

pub(crate) fn max_length(spec: &FilterSpec, line: String) -> Option<String> {
    match spec.max_length {
        Some(max) if char_len(&line) > max => None,
        _ => Some(line),
    }
}

pub(crate) fn must_contain(spec: &FilterSpec, line: String) -> Option<String> {
    match &spec.must_contain {
        Some(needle) if !line.contains(needle.as_str()) => None,
        _ => Some(line),
    }
}

pub(crate) fn must_not_contain(spec: &FilterSpec, line: String) -> Option<String> {
    match &spec.must_not_contain {
        Some(needle) if line.contains(needle.as_str()) => None,
        _ => Some(line),
    }
}

/// Cut to `truncate_to` characters; shorter lines are kept whole.
pub(crate) fn truncate(spec: &FilterSpec, mut line: String) -> Option<String> {
    if let Some(size) = spec.truncate_to {
        let cut = split_at_char(&line, size).0.len();
        line.truncate(cut);
    }
    Some(line)
}

pub(crate) fn highlight(spec: &FilterSpec, line: String) -> Option<String> {
    if !spec.highlight_prefix {
        return Some(line);
    }

    let (prefix, rest) = split_at_char(&line, HIGHLIGHT_PREFIX_CHARS);

    Some(format!(
        "{HIGHLIGHT_OPEN}{}{HIGHLIGHT_CLOSE}{}",
        escape_html(prefix),
        escape_html(rest)
    ))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split after the first `n` characters (or at the end if shorter).
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(idx)
}
