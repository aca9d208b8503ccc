//! # Urbanist Experiment Log
//!
//! A lightweight experiment-logging helper. Given a run's metadata,
//! parameters, data sources, metrics and produced artifacts, it merges them
//! against fixed default templates and writes a single timestamped JSON
//! document per run into a directory.
//!
//! ## Guarantees
//!
//! - **Completeness**: every record carries every template field; omitted
//!   inputs hold their defaults (`""`, `[]`, `null`).
//! - **One file per call**: each record gets a new file named
//!   `<run_type>_<compact UTC timestamp>_<run id prefix>.json`; existing files
//!   are never touched.
//! - **No hidden state**: a logger holds only its directory and schema version.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use serde_json::json;
//! use urbanist_explog::{ExperimentLogger, LogEntry};
//!
//! let logger = ExperimentLogger::builder()
//!     .save_dir("logs")
//!     .build()?;
//!
//! let path = logger.log(
//!     &LogEntry::new("qc")
//!         .metadata(json!({"dataset_id": "harris-2017", "user": "alice"}))
//!         .metrics(json!({"qc_min": 0.0, "qc_max": 4.2, "qc_nodata_percent": 1.3})),
//! )?;
//! println!("Record: {}", path.display());
//! # Ok::<(), urbanist_explog::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod experiment;

pub use config::LoggerConfig;
pub use error::{Error, Result};
pub use experiment::{ExperimentLogger, ExperimentLoggerBuilder, LogEntry, LogRecord};
