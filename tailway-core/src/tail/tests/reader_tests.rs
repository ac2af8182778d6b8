use crate::tail::{LineReader, RawLine};
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use tempfile::TempDir;

fn write_file(contents: &[u8]) -> (TempDir, File) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, contents).unwrap();
    let file = File::open(&path).unwrap();
    (dir, file)
}

fn reader(contents: &[u8], start: u64) -> (TempDir, LineReader) {
    let (dir, file) = write_file(contents);
    let reader = LineReader::new(file, start, contents.len() as u64).unwrap();
    (dir, reader)
}

fn texts(reader: &mut LineReader) -> Vec<String> {
    reader.by_ref().map(|l| l.unwrap().text).collect()
}

#[test]
fn yields_complete_lines_with_end_offsets() {
    // Arrange
    let (_dir, reader) = reader(b"one\ntwo\n", 0);

    // Act
    let lines: Vec<RawLine> = reader.map(|l| l.unwrap()).collect();

    // Assert
    assert_eq!(
        lines,
        vec![
            RawLine {
                text: "one".into(),
                end_offset: 4
            },
            RawLine {
                text: "two".into(),
                end_offset: 8
            },
        ]
    );
}

#[test]
fn holds_back_partial_trailing_line() {
    let (_dir, mut reader) = reader(b"one\ntw", 0);

    assert_eq!(texts(&mut reader), vec!["one"]);
    assert_eq!(reader.offset(), 4);
}

#[test]
fn unterminated_only_line_makes_no_progress() {
    let (_dir, mut reader) = reader(b"still writing", 0);

    assert!(texts(&mut reader).is_empty());
    assert_eq!(reader.offset(), 0);
}

#[test]
fn strips_carriage_returns() {
    let (_dir, mut reader) = reader(b"a\r\nb\r\n", 0);

    assert_eq!(texts(&mut reader), vec!["a", "b"]);
    assert_eq!(reader.offset(), 6);
}

#[test]
fn keeps_empty_lines() {
    let (_dir, mut reader) = reader(b"\n\nx\n", 0);

    assert_eq!(texts(&mut reader), vec!["", "", "x"]);
}

#[test]
fn starts_mid_file() {
    let (_dir, mut reader) = reader(b"one\ntwo\n", 4);

    assert_eq!(texts(&mut reader), vec!["two"]);
    assert_eq!(reader.offset(), 8);
}

#[test]
fn starting_mid_line_yields_remainder_as_first_line() {
    let (_dir, mut reader) = reader(b"one\ntwo\n", 1);

    assert_eq!(texts(&mut reader), vec!["ne", "two"]);
}

#[test]
fn stops_at_end_bound() {
    // Arrange
    let (_dir, file) = write_file(b"one\ntwo\n");

    // Act
    let mut reader = LineReader::new(file, 0, 4).unwrap();

    // Assert
    assert_eq!(texts(&mut reader), vec!["one"]);
    assert_eq!(reader.offset(), 4);
}

#[test]
fn bytes_appended_past_end_bound_are_not_read() {
    // Arrange
    let (dir, file) = write_file(b"one\n");
    super::test_helpers::append(&dir.path().join("app.log"), b"two\n");

    // Act
    let mut reader = LineReader::new(file, 0, 4).unwrap();

    // Assert
    assert_eq!(texts(&mut reader), vec!["one"]);
}

#[test]
fn budget_stops_at_first_boundary_past_limit() {
    let (_dir, reader) = reader(b"aaaa\nbbbb\ncccc\n", 0);
    let mut reader = reader.with_budget(6);

    assert_eq!(texts(&mut reader), vec!["aaaa", "bbbb"]);
    assert_eq!(reader.offset(), 10);
}

#[test]
fn budget_smaller_than_first_line_still_makes_progress() {
    let (_dir, reader) = reader(b"aaaa\nbbbb\n", 0);
    let mut reader = reader.with_budget(1);

    assert_eq!(texts(&mut reader), vec!["aaaa"]);
    assert_eq!(reader.offset(), 5);
}

#[test]
fn invalid_utf8_is_replaced() {
    let (_dir, mut reader) = reader(b"ok\xff\n", 0);

    assert_eq!(texts(&mut reader), vec!["ok\u{FFFD}"]);
}
