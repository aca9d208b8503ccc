//! Logger configuration
//!
//! The logger has exactly two construction parameters, both fixed for its
//! lifetime: the directory records are written to and the schema version
//! stamped into every record.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Directory used when none is configured.
pub const DEFAULT_SAVE_DIR: &str = "logs";

/// Schema version stamped into records when none is configured.
pub const DEFAULT_SCHEMA_VERSION: &str = "urbanist_experiment_log_v0.1";

/// Construction parameters for an [`ExperimentLogger`](crate::ExperimentLogger).
///
/// Missing keys take their defaults when deserialized, so a partial
/// configuration document is valid:
///
/// ```rust
/// use urbanist_explog::LoggerConfig;
///
/// let config = LoggerConfig::from_json_str(r#"{"save_dir": "runs"}"#)?;
/// assert_eq!(config.save_dir.to_str(), Some("runs"));
/// assert_eq!(config.schema_version, "urbanist_experiment_log_v0.1");
/// # Ok::<(), urbanist_explog::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Directory where records are written; created recursively if missing.
    pub save_dir: PathBuf,
    /// Literal string stamped into every record.
    pub schema_version: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Create a configuration for the given directory with the default schema version.
    #[must_use]
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            ..Self::default()
        }
    }

    /// Override the schema version.
    #[must_use]
    pub fn with_schema_version(mut self, schema_version: impl Into<String>) -> Self {
        self.schema_version = schema_version.into();
        self
    }

    /// Parse a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not a valid configuration.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }
}
