//! Log Entry - caller input for a single `log` call

use serde_json::Value;

/// Description of a run as supplied by the caller.
///
/// Only `run_type` is required. Each section is a JSON object; a section that
/// is omitted, `null` or not an object falls back to its default template.
///
/// ```rust
/// use serde_json::json;
/// use urbanist_explog::LogEntry;
///
/// let entry = LogEntry::new("training")
///     .metadata(json!({"user": "alice", "model": {"name": "resnet"}}))
///     .parameters(json!({"epochs": 10, "custom_flag": true}))
///     .metrics(json!({"mae": 0.5}))
///     .artifact("model.pt");
///
/// assert_eq!(entry.run_type(), "training");
/// assert_eq!(entry.artifacts_input().map(<[_]>::len), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogEntry {
    run_type: String,
    metadata: Option<Value>,
    parameters: Option<Value>,
    data_sources: Option<Value>,
    metrics: Option<Value>,
    artifacts: Option<Vec<Value>>,
}

impl LogEntry {
    /// Create an entry for the given run type with every section omitted.
    #[must_use]
    pub fn new(run_type: impl Into<String>) -> Self {
        Self {
            run_type: run_type.into(),
            ..Self::default()
        }
    }

    /// Set the metadata mapping.
    #[must_use]
    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the parameters mapping.
    #[must_use]
    pub fn parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Set the data sources mapping.
    #[must_use]
    pub fn data_sources(mut self, data_sources: Value) -> Self {
        self.data_sources = Some(data_sources);
        self
    }

    /// Set the metrics mapping.
    #[must_use]
    pub fn metrics(mut self, metrics: Value) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Replace the artifact list.
    #[must_use]
    pub fn artifacts(mut self, artifacts: Vec<Value>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    /// Append one artifact descriptor (a path string or an object).
    #[must_use]
    pub fn artifact(mut self, artifact: impl Into<Value>) -> Self {
        self.artifacts
            .get_or_insert_with(Vec::new)
            .push(artifact.into());
        self
    }

    /// Get the run type.
    #[must_use]
    pub fn run_type(&self) -> &str {
        &self.run_type
    }

    /// Get the metadata input, if supplied.
    #[must_use]
    pub const fn metadata_input(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Get the parameters input, if supplied.
    #[must_use]
    pub const fn parameters_input(&self) -> Option<&Value> {
        self.parameters.as_ref()
    }

    /// Get the data sources input, if supplied.
    #[must_use]
    pub const fn data_sources_input(&self) -> Option<&Value> {
        self.data_sources.as_ref()
    }

    /// Get the metrics input, if supplied.
    #[must_use]
    pub const fn metrics_input(&self) -> Option<&Value> {
        self.metrics.as_ref()
    }

    /// Get the artifact descriptors, if supplied.
    #[must_use]
    pub fn artifacts_input(&self) -> Option<&[Value]> {
        self.artifacts.as_deref()
    }
}
