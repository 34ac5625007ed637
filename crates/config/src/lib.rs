//! Configuration loading, validation, and env substitution.
//!
//! Config files: `switchboard.toml`, `switchboard.yaml`, or `switchboard.json`.
//! Searched in `./` then the platform config directory, unless overridden
//! with `--config-dir`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{
        clear_config_dir, clear_data_dir, config_dir, data_dir, discover_and_load, load_config,
        set_config_dir, set_data_dir,
    },
    schema::{DatabaseConfig, DispatchConfig, ServerConfig, SwitchboardConfig},
    validate::{Diagnostic, Severity, ValidationResult},
};
