mod gateway;
mod pid;
mod reload;
mod runtime;
pub mod setup;

pub use gateway::{RequestCtx, TailwayGateway};
pub use reload::ReloadHandle;
pub use runtime::{RuntimeState, build_runtime_state, reload_runtime_state};
pub use setup::{build_pingora_server, run};
