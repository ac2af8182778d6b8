use crate::conf::types::RuntimeConfig;
use crate::conf::validation::{ValidatedConfig, validate_config};
use crate::conf::ConfigError;
use std::fs;
use std::path::Path;

/// Name of the config file inside a config directory.
pub const ENTRYPOINT_FILE: &str = "tailway.hcl";

/// Load, resolve and validate the config in `root`.
///
/// Validation errors fail the load; warnings are returned with the config.
pub fn load_config(root: &Path) -> Result<ValidatedConfig, ConfigError> {
    let config = load_runtime_config(root)?;

    let report = validate_config(&config, &root.join(ENTRYPOINT_FILE));
    if !report.errors.is_empty() {
        return Err(ConfigError::Validation { report });
    }

    Ok(ValidatedConfig { config, report })
}

/// Load and resolve the config in `root` without semantic validation.
pub fn load_runtime_config(root: &Path) -> Result<RuntimeConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let path = root.join(ENTRYPOINT_FILE);
    let contents = fs::read_to_string(&path).map_err(|e| ConfigError::read_file(&path, e))?;

    let mut config: RuntimeConfig =
        hcl::from_str(&contents).map_err(|e| ConfigError::parse(&path, e))?;

    //--------------------------------------------------------------------------
    // Resolve paths relative to the config directory
    //--------------------------------------------------------------------------
    if config.tail.log_dir.is_relative() {
        config.tail.log_dir = root.join(&config.tail.log_dir);
    }

    Ok(config)
}
