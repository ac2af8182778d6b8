mod error;
mod loader;
#[cfg(test)]
mod tests;
pub mod types;
mod validation;

pub use error::ConfigError;
pub use loader::{ENTRYPOINT_FILE, load_config, load_runtime_config};
pub use types::RuntimeConfig;
pub use validation::{Origin, Severity, ValidatedConfig, ValidationIssue, ValidationReport, validate_config};
