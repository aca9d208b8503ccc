//! Experiment Run Logging
//!
//! This module turns a caller's description of one run into a complete,
//! timestamped JSON record and writes it to its own file.
//!
//! ## Record Overview
//!
//! ```text
//! LogRecord
//!   ├── schema_version / run_id / timestamp_utc / run_type
//!   ├── metadata      [passthrough merge, nested `model` merge]
//!   ├── data_sources  [known keys replace, others dropped]
//!   ├── parameters    [known keys overwrite, others -> `extra`]
//!   └── results
//!         ├── metrics          [23 known names, others dropped]
//!         └── artifacts_saved  [verbatim]
//! ```
//!
//! Each section has its own merge function so the four policies stay
//! independent.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use serde_json::json;
//! use urbanist_explog::experiment::{ExperimentLogger, LogEntry};
//!
//! let logger = ExperimentLogger::with_defaults()?;
//!
//! let entry = LogEntry::new("training")
//!     .metadata(json!({"experiment_name": "flood-depth", "model": {"name": "unet"}}))
//!     .parameters(json!({"epochs": 40, "learning_rate": 1e-4, "seed": 7}))
//!     .metrics(json!({"iou_flooded": 0.81}))
//!     .artifact("checkpoints/unet.pt");
//!
//! let path = logger.log(&entry)?;
//! # Ok::<(), urbanist_explog::Error>(())
//! ```

mod data_sources;
mod log_entry;
mod log_record;
mod logger;
mod metadata;
mod metrics;
mod parameters;

pub use data_sources::{merge_data_sources, DataSources};
pub use log_entry::LogEntry;
pub use log_record::{to_json_pretty, LogRecord, Results};
pub use logger::{ExperimentLogger, ExperimentLoggerBuilder};
pub use metadata::{merge_metadata, Metadata};
pub use metrics::{merge_metrics, Metrics};
pub use parameters::{merge_parameters, Parameters};

use serde_json::{Map, Value};

/// Borrow a section input as a JSON object.
///
/// Absent, `null` and non-object inputs all mean "use the template".
fn section_object<'a>(input: Option<&'a Value>, section: &str) -> Option<&'a Map<String, Value>> {
    match input? {
        Value::Object(fields) => Some(fields),
        Value::Null => None,
        other => {
            tracing::debug!(section, kind = value_kind(other), "ignoring non-object section input");
            None
        }
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
