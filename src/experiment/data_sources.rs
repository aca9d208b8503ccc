//! Data Sources section - raster and vector inputs of a run

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::section_object;

/// Input files used by a run. Both lists default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    raster_files: Value,
    vector_files: Value,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            raster_files: Value::Array(Vec::new()),
            vector_files: Value::Array(Vec::new()),
        }
    }
}

impl DataSources {
    /// Get the raster file paths that are strings, in order.
    #[must_use]
    pub fn raster_files(&self) -> Vec<&str> {
        string_items(&self.raster_files)
    }

    /// Get the vector file paths that are strings, in order.
    #[must_use]
    pub fn vector_files(&self) -> Vec<&str> {
        string_items(&self.vector_files)
    }

    /// Get the raw value of `raster_files` or `vector_files`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match key {
            "raster_files" => Some(&self.raster_files),
            "vector_files" => Some(&self.vector_files),
            _ => None,
        }
    }
}

fn string_items(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Build the data sources of a run.
///
/// Only `raster_files` and `vector_files` are consulted; each replaces its
/// default list wholesale. Any other key is dropped.
#[must_use]
pub fn merge_data_sources(input: Option<&Value>) -> DataSources {
    let mut sources = DataSources::default();
    if let Some(fields) = section_object(input, "data_sources") {
        if let Some(raster) = fields.get("raster_files") {
            sources.raster_files = raster.clone();
        }
        if let Some(vector) = fields.get("vector_files") {
            sources.vector_files = vector.clone();
        }
    }
    sources
}
