//! Experiment Logger - writes one timestamped JSON record per run
//!
//! Each call is independent: it builds a fresh record, writes it to a new
//! file and keeps nothing in memory afterwards. Existing files are never read,
//! updated or deleted.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    merge_data_sources, merge_metadata, merge_metrics, merge_parameters, LogEntry, LogRecord,
    Results,
};
use crate::config::LoggerConfig;
use crate::{Error, Result};

/// Writes run records into a fixed directory.
///
/// ## Example
///
/// ```rust,no_run
/// use serde_json::json;
/// use urbanist_explog::{ExperimentLogger, LogEntry};
///
/// let logger = ExperimentLogger::builder().save_dir("logs").build()?;
///
/// let path = logger.log(
///     &LogEntry::new("parity")
///         .data_sources(json!({"raster_files": ["depth.tif"]}))
///         .metrics(json!({"mae": 0.12, "rmse": 0.2})),
/// )?;
/// println!("wrote {}", path.display());
/// # Ok::<(), urbanist_explog::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExperimentLogger {
    save_dir: PathBuf,
    schema_version: String,
}

impl ExperimentLogger {
    /// Create a logger, creating `save_dir` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreateDir`] if the directory cannot be created, or
    /// [`Error::NotADirectory`] if the path exists and is not a directory.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let LoggerConfig {
            save_dir,
            schema_version,
        } = config;

        if save_dir.exists() && !save_dir.is_dir() {
            return Err(Error::NotADirectory(save_dir));
        }
        fs::create_dir_all(&save_dir).map_err(|source| Error::CreateDir {
            path: save_dir.clone(),
            source,
        })?;

        debug!(save_dir = %save_dir.display(), %schema_version, "experiment logger ready");
        Ok(Self {
            save_dir,
            schema_version,
        })
    }

    /// Create a logger writing to `logs` with the default schema version.
    ///
    /// # Errors
    ///
    /// Same as [`ExperimentLogger::new`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(LoggerConfig::default())
    }

    /// Create a builder starting from the default configuration.
    #[must_use]
    pub fn builder() -> ExperimentLoggerBuilder {
        ExperimentLoggerBuilder::default()
    }

    /// Get the directory records are written to.
    #[must_use]
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Get the schema version stamped into records.
    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Assemble the record for `entry` without writing it.
    ///
    /// A new run ID and capture time are taken on every call.
    #[must_use]
    pub fn build_record(&self, entry: &LogEntry) -> LogRecord {
        let run_id = Uuid::new_v4();
        let timestamp = Utc::now();

        let metadata = merge_metadata(entry.metadata_input());
        let parameters = merge_parameters(entry.parameters_input());
        let data_sources = merge_data_sources(entry.data_sources_input());
        let metrics = merge_metrics(entry.metrics_input());
        let artifacts = entry.artifacts_input().map(<[Value]>::to_vec).unwrap_or_default();

        debug!(%run_id, run_type = entry.run_type(), "assembled run record");
        LogRecord::new(
            self.schema_version.as_str(),
            run_id,
            timestamp,
            entry.run_type(),
            metadata,
            data_sources,
            parameters,
            Results::new(metrics, artifacts),
        )
    }

    /// Write `record` as a new file in the log directory and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Collision`] if a file already exists at the derived
    /// path and [`Error::Write`] for any other IO failure. On error the run
    /// must be treated as not recorded.
    pub fn write_record(&self, record: &LogRecord) -> Result<PathBuf> {
        let bytes = record.to_json_pretty()?;

        fs::create_dir_all(&self.save_dir).map_err(|source| Error::Write {
            path: self.save_dir.clone(),
            source,
        })?;

        let path = self.save_dir.join(record.file_name());
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                warn!(path = %path.display(), "record file already exists, refusing to overwrite");
                return Err(Error::Collision(path));
            }
            Err(source) => return Err(Error::Write { path, source }),
        };
        if let Err(source) = file.write_all(&bytes) {
            return Err(Error::Write { path, source });
        }

        info!(
            run_id = %record.run_id(),
            run_type = record.run_type(),
            path = %path.display(),
            "run record written"
        );
        Ok(path)
    }

    /// Log a run: build its record and write it.
    ///
    /// # Errors
    ///
    /// See [`ExperimentLogger::write_record`].
    pub fn log(&self, entry: &LogEntry) -> Result<PathBuf> {
        let record = self.build_record(entry);
        self.write_record(&record)
    }

    /// Log a run from positional arguments; `None` means the section was omitted.
    ///
    /// # Errors
    ///
    /// See [`ExperimentLogger::write_record`].
    pub fn log_run(
        &self,
        run_type: &str,
        metadata: Option<Value>,
        parameters: Option<Value>,
        data_sources: Option<Value>,
        metrics: Option<Value>,
        artifacts: Option<Vec<Value>>,
    ) -> Result<PathBuf> {
        let mut entry = LogEntry::new(run_type);
        if let Some(metadata) = metadata {
            entry = entry.metadata(metadata);
        }
        if let Some(parameters) = parameters {
            entry = entry.parameters(parameters);
        }
        if let Some(data_sources) = data_sources {
            entry = entry.data_sources(data_sources);
        }
        if let Some(metrics) = metrics {
            entry = entry.metrics(metrics);
        }
        if let Some(artifacts) = artifacts {
            entry = entry.artifacts(artifacts);
        }
        self.log(&entry)
    }
}

/// Builder for `ExperimentLogger`.
#[derive(Debug, Default)]
pub struct ExperimentLoggerBuilder {
    config: LoggerConfig,
}

impl ExperimentLoggerBuilder {
    /// Set the directory records are written to.
    #[must_use]
    pub fn save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.config.save_dir = save_dir.into();
        self
    }

    /// Set the schema version stamped into records.
    #[must_use]
    pub fn schema_version(mut self, schema_version: impl Into<String>) -> Self {
        self.config.schema_version = schema_version.into();
        self
    }

    /// Build the logger, creating the log directory.
    ///
    /// # Errors
    ///
    /// Same as [`ExperimentLogger::new`].
    pub fn build(self) -> Result<ExperimentLogger> {
        ExperimentLogger::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_logger() -> (TempDir, ExperimentLogger) {
        let dir = TempDir::new().unwrap();
        let logger = ExperimentLogger::builder()
            .save_dir(dir.path().join("runs"))
            .schema_version("test_schema_v1")
            .build()
            .unwrap();
        (dir, logger)
    }

    #[test]
    fn test_new_creates_nested_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        let logger = ExperimentLogger::new(LoggerConfig::new(&nested)).unwrap();
        assert!(nested.is_dir());
        assert_eq!(logger.save_dir(), nested);
        assert_eq!(logger.schema_version(), "urbanist_experiment_log_v0.1");
    }

    #[test]
    fn test_new_existing_dir_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(ExperimentLogger::new(LoggerConfig::new(dir.path())).is_ok());
        assert!(ExperimentLogger::new(LoggerConfig::new(dir.path())).is_ok());
    }

    #[test]
    fn test_new_rejects_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, b"x").unwrap();
        let err = ExperimentLogger::new(LoggerConfig::new(&file)).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_build_record_stamps_config() {
        let (_dir, logger) = test_logger();
        let record = logger.build_record(&LogEntry::new("qc"));
        assert_eq!(record.schema_version(), "test_schema_v1");
        assert_eq!(record.run_type(), "qc");
        assert!(record.results().artifacts_saved().is_empty());
    }

    #[test]
    fn test_build_record_fresh_ids() {
        let (_dir, logger) = test_logger();
        let entry = LogEntry::new("qc");
        let a = logger.build_record(&entry);
        let b = logger.build_record(&entry);
        assert_ne!(a.run_id(), b.run_id());
    }

    #[test]
    fn test_log_writes_file_named_after_record() {
        let (_dir, logger) = test_logger();
        let path = logger
            .log(&LogEntry::new("training").metrics(json!({"rmse": 1.5})))
            .unwrap();

        assert!(path.starts_with(logger.save_dir()));
        let record = LogRecord::read_from(&path).unwrap();
        assert_eq!(path.file_name().unwrap().to_str(), Some(record.file_name().as_str()));
        assert_eq!(record.results().metrics().value("rmse"), Some(1.5));
    }

    #[test]
    fn test_write_record_refuses_overwrite() {
        let (_dir, logger) = test_logger();
        let record = logger.build_record(&LogEntry::new("training"));
        let first = logger.write_record(&record).unwrap();
        let before = fs::read(&first).unwrap();

        let err = logger.write_record(&record).unwrap_err();
        assert!(matches!(err, Error::Collision(ref p) if *p == first));
        assert_eq!(fs::read(&first).unwrap(), before);
    }

    #[test]
    fn test_log_run_positional() {
        let (_dir, logger) = test_logger();
        let path = logger
            .log_run(
                "evaluation",
                Some(json!({"user": "alice"})),
                None,
                Some(json!({"vector_files": ["aoi.geojson"]})),
                None,
                Some(vec![json!("report.html")]),
            )
            .unwrap();

        let record = LogRecord::read_from(path).unwrap();
        assert_eq!(record.metadata().user(), Some("alice"));
        assert_eq!(record.data_sources().vector_files(), ["aoi.geojson"]);
        assert_eq!(record.results().artifacts_saved(), [json!("report.html")]);
    }

    #[test]
    fn test_log_run_type_with_missing_subdir_fails() {
        let (_dir, logger) = test_logger();
        let err = logger.log(&LogEntry::new("nested/run")).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
