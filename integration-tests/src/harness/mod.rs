pub mod server;
pub mod tracing;

pub use server::{TestServer, events};
pub use self::tracing::{CapturedEvent, init_test_tracing};
