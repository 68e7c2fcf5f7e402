//! Configuration file loading for strategy-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./council.toml` or `./.council.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/strategy-council/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileCouncilConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig, ProviderKind,
};
pub use loader::ConfigLoader;
