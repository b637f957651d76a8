use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Analysis, Config, Data, Logging};

/// Name (without extension) of the configuration file looked up in the
/// working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "evacstats";

/// Prefix for environment overrides, e.g. `EVACSTATS__DATA__DIRECTORY`.
pub const ENV_PREFIX: &str = "EVACSTATS";

/// Loads the application configuration.
///
/// Sources are layered, later ones overriding earlier ones:
/// 1. built-in defaults;
/// 2. the TOML file at `path`, or `evacstats.toml` in the working directory
///    if it exists;
/// 3. `EVACSTATS__<SECTION>__<KEY>` environment variables.
///
/// An explicitly given `path` must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("data.directory", "./data")?
        .set_default("analysis.significance_level", 0.05)?
        .set_default("analysis.t_test", "student")?
        .set_default("logging.level", "info")?;

    let builder = match path {
        Some(path) => builder.add_source(config::File::from(path).required(true)),
        None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
    };

    let config = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = config.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects settings that deserialize but cannot be used.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let alpha = config.analysis.significance_level;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "analysis.significance_level must be between 0 and 1, got {alpha}"
        )));
    }
    if config.data.directory.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "data.directory must not be empty".to_string(),
        ));
    }
    Ok(())
}
