//! Turns a [`TailResult`](crate::tail::TailResult) into an HTTP response.
//!
//! A request without a pointer gets the viewer page, which embeds the first
//! batch of lines and a poller script. Requests with a pointer get the compact
//! `{log, pointer}` JSON payload the poller merges into the page.

mod handler;
mod page;
mod response;

pub use handler::handle_tail_request;
pub use page::{PageContext, format_interval, render_page};
pub use response::{PollPayload, TailResponse, assemble};
