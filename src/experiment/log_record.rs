//! Log Record - the persisted document for one run

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{DataSources, Metadata, Metrics, Parameters};
use crate::Result;

/// Number of run ID characters used in record file names.
const FILE_ID_PREFIX_LEN: usize = 8;

/// Results of a run: metrics and the artifacts it produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Results {
    metrics: Metrics,
    artifacts_saved: Vec<Value>,
}

impl Results {
    /// Create results from metrics and artifact descriptors.
    #[must_use]
    pub const fn new(metrics: Metrics, artifacts_saved: Vec<Value>) -> Self {
        Self {
            metrics,
            artifacts_saved,
        }
    }

    /// Get the run metrics.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get the artifact descriptors, in the order supplied.
    #[must_use]
    pub fn artifacts_saved(&self) -> &[Value] {
        &self.artifacts_saved
    }
}

/// Log Record represents one complete JSON document describing a run.
///
/// Records are built once per `log` call and never mutated afterwards. Every
/// section is structurally complete: fields the caller did not supply hold
/// their template defaults.
///
/// ## Field Order
///
/// Serialization order is fixed:
/// `schema_version`, `run_id`, `timestamp_utc`, `run_type`, `metadata`,
/// `data_sources`, `parameters`, `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    schema_version: String,
    run_id: Uuid,
    #[serde(with = "timestamp_format")]
    timestamp_utc: DateTime<Utc>,
    run_type: String,
    metadata: Metadata,
    data_sources: DataSources,
    parameters: Parameters,
    results: Results,
}

impl LogRecord {
    /// Assemble a record from already merged sections.
    ///
    /// The timestamp is truncated to microsecond precision, the resolution
    /// it is rendered with.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        schema_version: impl Into<String>,
        run_id: Uuid,
        timestamp_utc: DateTime<Utc>,
        run_type: impl Into<String>,
        metadata: Metadata,
        data_sources: DataSources,
        parameters: Parameters,
        results: Results,
    ) -> Self {
        Self {
            schema_version: schema_version.into(),
            run_id,
            timestamp_utc: timestamp_format::truncate(timestamp_utc),
            run_type: run_type.into(),
            metadata,
            data_sources,
            parameters,
            results,
        }
    }

    /// Get the schema version.
    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Get the run ID.
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Get the capture timestamp.
    #[must_use]
    pub const fn timestamp_utc(&self) -> DateTime<Utc> {
        self.timestamp_utc
    }

    /// Get the timestamp as written into the record (ISO-8601, trailing `Z`).
    #[must_use]
    pub fn timestamp_string(&self) -> String {
        timestamp_format::render(&self.timestamp_utc)
    }

    /// Get the run type.
    #[must_use]
    pub fn run_type(&self) -> &str {
        &self.run_type
    }

    /// Get the metadata section.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get the data sources section.
    #[must_use]
    pub const fn data_sources(&self) -> &DataSources {
        &self.data_sources
    }

    /// Get the parameters section.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Get the results section.
    #[must_use]
    pub const fn results(&self) -> &Results {
        &self.results
    }

    /// File name for this record.
    ///
    /// `<run_type>_<timestamp without ':' and '-'>_<first 8 hex chars of run_id>.json`.
    /// The run type is used as given.
    #[must_use]
    pub fn file_name(&self) -> String {
        let compact: String = self
            .timestamp_string()
            .chars()
            .filter(|c| !matches!(c, ':' | '-'))
            .collect();
        let id = self.run_id.hyphenated().to_string();
        format!(
            "{}_{}_{}.json",
            self.run_type,
            compact,
            &id[..FILE_ID_PREFIX_LEN]
        )
    }

    /// Serialize the record as JSON indented with four spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        to_json_pretty(self)
    }

    /// Read a record back from a file written by the logger.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid record.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

/// Serialize any value as JSON indented with four spaces, without a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(4096);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// `YYYY-MM-DDTHH:MM:SS.ffffffZ` rendering of UTC timestamps.
mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
    const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

    pub fn truncate(ts: DateTime<Utc>) -> DateTime<Utc> {
        ts.trunc_subsecs(6)
    }

    pub fn render(ts: &DateTime<Utc>) -> String {
        ts.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&render(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, PARSE_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
