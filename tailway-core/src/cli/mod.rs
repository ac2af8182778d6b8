pub mod config;
pub mod tail;

pub use config::ConfigCmd;
pub use tail::TailArgs;
