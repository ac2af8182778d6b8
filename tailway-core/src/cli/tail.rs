use crate::conf::load_config;
use crate::respond::PollPayload;
use crate::tail::{FilterSpec, TailRequest, Tailer};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// One-shot fetch against the configured log directory.
#[derive(Args, Debug)]
pub struct TailArgs {
    /// Log name; ".log" is appended when missing
    #[arg(default_value = "error")]
    pub log: String,

    /// Path to config directory
    #[arg(long, default_value = "config")]
    pub config: PathBuf,

    /// Resume from a pointer returned by a previous call
    #[arg(long)]
    pub pointer: Option<u64>,

    /// Drop the first N characters of every line
    #[arg(long)]
    pub start_line_at: Option<usize>,

    #[arg(long)]
    pub line_min_length: Option<usize>,

    #[arg(long)]
    pub line_max_length: Option<usize>,

    #[arg(long)]
    pub line_contains: Option<String>,

    #[arg(long)]
    pub not_line_contains: Option<String>,

    #[arg(long)]
    pub trim_to_size: Option<usize>,

    /// Wrap the start of each line in highlight markup
    #[arg(long)]
    pub color_line_begin: bool,
}

impl TailArgs {
    pub fn to_request(&self) -> TailRequest {
        let filters = FilterSpec {
            start_column: self.start_line_at,
            min_length: self.line_min_length,
            max_length: self.line_max_length,
            must_contain: self.line_contains.clone(),
            must_not_contain: self.not_line_contains.clone(),
            truncate_to: self.trim_to_size,
            highlight_prefix: self.color_line_begin,
        };

        TailRequest::new(Some(&self.log), self.pointer, filters)
    }
}

/// Print the poll payload for one fetch as JSON.
pub fn run(args: TailArgs) -> Result<()> {
    let validated = load_config(&args.config)?;
    let tailer = Tailer::new(&validated.config.tail);

    let result = tailer.fetch(&args.to_request())?;

    let payload = PollPayload {
        log: result.text,
        pointer: result.next_offset,
    };
    println!("{}", serde_json::to_string(&payload)?);

    Ok(())
}
