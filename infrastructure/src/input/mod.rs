//! Decision input loading
//!
//! A council run reads one [`CouncilInput`] from a JSON or TOML file,
//! chosen by extension.

use council_domain::CouncilInput;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported input format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Invalid decision: {0}")]
    Invalid(String),
}

/// Loads decision files from disk
pub struct InputLoader;

impl InputLoader {
    pub fn load(path: &Path) -> Result<CouncilInput, InputError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let input: CouncilInput = match extension.as_str() {
            "json" => serde_json::from_str(&content).map_err(|source| InputError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            "toml" => toml::from_str(&content).map_err(|source| InputError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
            other => return Err(InputError::UnsupportedFormat(other.to_string())),
        };

        Self::validate(&input)?;
        debug!(
            "Loaded decision '{}' with {} options from {}",
            input.decision.title,
            input.decision.options.len(),
            path.display()
        );
        Ok(input)
    }

    /// Option ids must be present and unique; agents echo them back
    pub fn validate(input: &CouncilInput) -> Result<(), InputError> {
        if input.decision.options.is_empty() {
            return Err(InputError::Invalid("decision has no options".to_string()));
        }

        let mut seen = HashSet::new();
        for option in &input.decision.options {
            if option.id.trim().is_empty() {
                return Err(InputError::Invalid(format!(
                    "option '{}' has an empty id",
                    option.name
                )));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(InputError::Invalid(format!(
                    "duplicate option id '{}'",
                    option.id
                )));
            }
        }
        Ok(())
    }
}
