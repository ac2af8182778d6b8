use crate::conf::types::TailConfig;
use crate::markup::escape_html;
use crate::tail::{
    FilterSpec, LINE_BREAK, LineReader, ResolvedStart, TailError, TailRequest, normalize_log_name,
    resolve_log_path, resolve_start,
};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailResult {
    /// Filtered lines, each followed by [`LINE_BREAK`].
    pub text: String,
    /// Offset the client echoes on its next poll.
    pub next_offset: u64,
    pub path: PathBuf,
    pub start: u64,
    pub rolled_over: bool,
    pub lines_read: usize,
    pub lines_emitted: usize,
}

/// Stateless tail reader over one log directory.
#[derive(Debug, Clone)]
pub struct Tailer {
    log_dir: PathBuf,
    bytes_to_read: u64,
    max_read_bytes: u64,
    escape_markup: bool,
}

impl Tailer {
    pub fn new(cfg: &TailConfig) -> Self {
        Self {
            log_dir: cfg.log_dir.clone(),
            bytes_to_read: cfg.bytes_to_read,
            max_read_bytes: cfg.max_read_bytes,
            escape_markup: cfg.escape_markup,
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Read everything new since `request.offset` (or the tail window on first
    /// load) and filter it.
    pub fn fetch(&self, request: &TailRequest) -> Result<TailResult, TailError> {
        let name = normalize_log_name(Some(&request.log_name));

        let path =
            resolve_log_path(&self.log_dir, &name).map_err(|e| TailError::resolve(e, &name))?;
        let file = File::open(&path).map_err(|e| TailError::open(&name, e))?;
        let file_len = file
            .metadata()
            .map_err(|e| TailError::read(&name, e))?
            .len();

        let ResolvedStart { start, rolled_over } =
            resolve_start(request.offset, file_len, self.bytes_to_read);

        if rolled_over {
            tracing::info!(
                log = %name,
                pointer = request.offset,
                file_len,
                start,
                "log rolled over, restarting from tail window"
            );
        }

        let mut lines = LineReader::new(file, start, file_len)
            .map_err(|e| TailError::read(&name, e))?
            .with_budget(self.max_read_bytes);

        let mut text = String::new();
        let mut lines_read = 0;
        let mut lines_emitted = 0;

        for line in lines.by_ref() {
            let line = line.map_err(|e| TailError::read(&name, e))?;
            lines_read += 1;

            if let Some(rendered) = self.render(&request.filters, line.text) {
                text.push_str(&rendered);
                text.push_str(LINE_BREAK);
                lines_emitted += 1;
            }
        }

        let next_offset = lines.offset();

        tracing::debug!(
            log = %name,
            start,
            next_offset,
            lines_read,
            lines_emitted,
            "tail fetched"
        );

        Ok(TailResult {
            text,
            next_offset,
            path,
            start,
            rolled_over,
            lines_read,
            lines_emitted,
        })
    }

    fn render(&self, filters: &FilterSpec, line: String) -> Option<String> {
        let line = filters.apply(line)?;

        // Highlighted lines were already escaped piecewise.
        if self.escape_markup && !filters.highlight_prefix {
            Some(escape_html(&line))
        } else {
            Some(line)
        }
    }
}
