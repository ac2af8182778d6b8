use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Take};

/// One complete line, terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    /// Byte offset just past this line's terminator.
    pub end_offset: u64,
}

/// Lazy, finite sequence of complete lines between two byte offsets of a file.
///
/// Only lines terminated by `\n` are yielded (a preceding `\r` is dropped). A
/// trailing partial line is left unread, and [`LineReader::offset`] stays at its
/// first byte so a later read picks it up whole. Bytes are decoded lossily as
/// UTF-8.
///
/// The file handle is owned by the reader and closed when it is dropped.
pub struct LineReader {
    inner: BufReader<Take<File>>,
    start: u64,
    offset: u64,
    budget: Option<u64>,
    buf: Vec<u8>,
    exhausted: bool,
}

impl LineReader {
    /// Read lines from `start` up to (not including) `end`.
    pub fn new(mut file: File, start: u64, end: u64) -> io::Result<Self> {
        file.seek(SeekFrom::Start(start))?;

        Ok(Self {
            inner: BufReader::new(file.take(end.saturating_sub(start))),
            start,
            offset: start,
            budget: None,
            buf: Vec::new(),
            exhausted: false,
        })
    }

    /// Stop at the first line boundary once `budget` bytes have been consumed.
    ///
    /// The first line is always read, however long, so every call makes progress.
    pub fn with_budget(mut self, budget: u64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Offset just past the last line yielded.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn budget_spent(&self) -> bool {
        match self.budget {
            Some(budget) => self.offset > self.start && self.offset - self.start >= budget,
            None => false,
        }
    }
}

impl Iterator for LineReader {
    type Item = io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.budget_spent() {
            return None;
        }

        self.buf.clear();
        let n = match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(n) => n,
            Err(e) => {
                self.exhausted = true;
                return Some(Err(e));
            }
        };

        // EOF, or an unterminated line still being written.
        if n == 0 || self.buf.last() != Some(&b'\n') {
            self.exhausted = true;
            return None;
        }

        self.offset += n as u64;

        let mut line = &self.buf[..n - 1];
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }

        Some(Ok(RawLine {
            text: String::from_utf8_lossy(line).into_owned(),
            end_offset: self.offset,
        }))
    }
}
