use crate::tail::filter::{
    column_skip, highlight, max_length, min_length, must_contain, must_not_contain, truncate,
};
use crate::tail::{FilterSpec, STAGES};
use pretty_assertions::assert_eq;

const OPEN: &str = "<span style='color:red;font-weight:bold'>";
const CLOSE: &str = "</span>";

fn apply(spec: &FilterSpec, line: &str) -> Option<String> {
    spec.apply(line.to_string())
}

//-----------------------------------------------------------------------------
// Pipeline
//-----------------------------------------------------------------------------

#[test]
fn stages_run_in_fixed_order() {
    let names: Vec<&str> = STAGES.iter().map(|(name, _)| *name).collect();

    assert_eq!(
        names,
        vec![
            "column_skip",
            "min_length",
            "max_length",
            "must_contain",
            "must_not_contain",
            "truncate",
            "highlight",
        ]
    );
}

#[test]
fn empty_spec_passes_lines_through() {
    let spec = FilterSpec::default();

    assert!(spec.is_empty());
    assert_eq!(apply(&spec, "anything <at> all"), Some("anything <at> all".into()));
    assert_eq!(apply(&spec, ""), Some(String::new()));
}

#[test]
fn column_skip_then_truncate_then_highlight() {
    // Arrange
    let spec = FilterSpec {
        start_column: Some(2),
        truncate_to: Some(5),
        highlight_prefix: true,
        ..FilterSpec::default()
    };

    // Act
    let out = apply(&spec, "abcdefghij");

    // Assert
    assert_eq!(out, Some(format!("{OPEN}cdefg{CLOSE}")));
}

#[test]
fn lengths_are_measured_after_column_skip() {
    let spec = FilterSpec {
        start_column: Some(4),
        min_length: Some(5),
        ..FilterSpec::default()
    };

    // "abcdefgh" becomes "efgh" (4 chars) before the length check.
    assert_eq!(apply(&spec, "abcdefgh"), None);
    assert_eq!(apply(&spec, "abcdefghi"), Some("efghi".into()));
}

#[test]
fn substring_filters_see_untruncated_line() {
    let spec = FilterSpec {
        must_contain: Some("needle".into()),
        truncate_to: Some(3),
        ..FilterSpec::default()
    };

    assert_eq!(apply(&spec, "haystack needle"), Some("hay".into()));
}

#[test]
fn not_contains_wins_over_contains() {
    let spec = FilterSpec {
        must_contain: Some("ERROR".into()),
        must_not_contain: Some("heartbeat".into()),
        ..FilterSpec::default()
    };

    assert_eq!(apply(&spec, "ERROR heartbeat missed"), None);
    assert_eq!(apply(&spec, "ERROR disk full"), Some("ERROR disk full".into()));
    assert_eq!(apply(&spec, "INFO disk ok"), None);
}

//-----------------------------------------------------------------------------
// Column skip
//-----------------------------------------------------------------------------

#[test]
fn column_skip_drops_prefix() {
    let spec = FilterSpec {
        start_column: Some(2),
        ..FilterSpec::default()
    };

    assert_eq!(column_skip(&spec, "abc".into()), Some("c".into()));
}

#[test]
fn column_skip_drops_lines_too_short_for_column() {
    let spec = FilterSpec {
        start_column: Some(3),
        ..FilterSpec::default()
    };

    assert_eq!(column_skip(&spec, "abc".into()), None);
    assert_eq!(column_skip(&spec, "".into()), None);
}

#[test]
fn column_zero_is_no_constraint() {
    let spec = FilterSpec {
        start_column: Some(0),
        ..FilterSpec::default()
    };

    assert_eq!(column_skip(&spec, "".into()), Some(String::new()));
    assert_eq!(column_skip(&spec, "abc".into()), Some("abc".into()));
}

#[test]
fn column_skip_counts_characters() {
    let spec = FilterSpec {
        start_column: Some(2),
        ..FilterSpec::default()
    };

    assert_eq!(column_skip(&spec, "éèxyz".into()), Some("xyz".into()));
}

//-----------------------------------------------------------------------------
// Length filters
//-----------------------------------------------------------------------------

#[test]
fn min_length_excludes_short_lines() {
    let spec = FilterSpec {
        min_length: Some(5),
        ..FilterSpec::default()
    };

    assert_eq!(min_length(&spec, "abcd".into()), None);
    assert_eq!(min_length(&spec, "abcde".into()), Some("abcde".into()));
}

#[test]
fn max_length_excludes_long_lines_without_truncating() {
    let spec = FilterSpec {
        max_length: Some(5),
        ..FilterSpec::default()
    };

    assert_eq!(max_length(&spec, "abcdef".into()), None);
    assert_eq!(max_length(&spec, "abcde".into()), Some("abcde".into()));
}

//-----------------------------------------------------------------------------
// Substring filters
//-----------------------------------------------------------------------------

#[test]
fn must_contain_keeps_matching_lines_only() {
    let spec = FilterSpec {
        must_contain: Some("GET".into()),
        ..FilterSpec::default()
    };

    assert_eq!(must_contain(&spec, "GET /".into()), Some("GET /".into()));
    assert_eq!(must_contain(&spec, "POST /".into()), None);
}

#[test]
fn must_not_contain_drops_matching_lines() {
    let spec = FilterSpec {
        must_not_contain: Some("/health".into()),
        ..FilterSpec::default()
    };

    assert_eq!(must_not_contain(&spec, "GET /health".into()), None);
    assert_eq!(must_not_contain(&spec, "GET /".into()), Some("GET /".into()));
}

//-----------------------------------------------------------------------------
// Truncate
//-----------------------------------------------------------------------------

#[test]
fn truncate_cuts_to_size() {
    let spec = FilterSpec {
        truncate_to: Some(3),
        ..FilterSpec::default()
    };

    assert_eq!(truncate(&spec, "abcdef".into()), Some("abc".into()));
}

#[test]
fn truncate_clamps_to_line_length() {
    let spec = FilterSpec {
        truncate_to: Some(10),
        ..FilterSpec::default()
    };

    assert_eq!(truncate(&spec, "abc".into()), Some("abc".into()));
}

#[test]
fn truncate_respects_character_boundaries() {
    let spec = FilterSpec {
        truncate_to: Some(4),
        ..FilterSpec::default()
    };

    assert_eq!(truncate(&spec, "héllo wörld".into()), Some("héll".into()));
}

//-----------------------------------------------------------------------------
// Highlight
//-----------------------------------------------------------------------------

fn highlighting() -> FilterSpec {
    FilterSpec {
        highlight_prefix: true,
        ..FilterSpec::default()
    }
}

#[test]
fn highlight_wraps_first_ten_characters() {
    assert_eq!(
        highlight(&highlighting(), "0123456789abc".into()),
        Some(format!("{OPEN}0123456789{CLOSE}abc"))
    );
}

#[test]
fn highlight_wraps_whole_short_line() {
    assert_eq!(
        highlight(&highlighting(), "short".into()),
        Some(format!("{OPEN}short{CLOSE}"))
    );
}

#[test]
fn highlight_escapes_prefix_and_rest_independently() {
    assert_eq!(
        highlight(&highlighting(), "<tag>&1234<end>".into()),
        Some(format!("{OPEN}&lt;tag&gt;&amp;1234{CLOSE}&lt;end&gt;"))
    );
}

#[test]
fn highlight_disabled_leaves_line_alone() {
    assert_eq!(
        highlight(&FilterSpec::default(), "<b>".into()),
        Some("<b>".into())
    );
}
