pub mod cli;
pub mod conf;
pub mod logging;
pub mod markup;
pub mod respond;
pub mod server;
pub mod tail;
