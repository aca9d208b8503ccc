//! Metadata section - who ran what, on which data, with which model

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::section_object;

/// Run metadata.
///
/// Known fields default to empty strings and `model` defaults to an object
/// with empty `name`, `version` and `commit_hash`. Keys outside the known
/// shape are kept verbatim and serialized after the known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    experiment_name: Value,
    dataset_id: Value,
    user: Value,
    script_name: Value,
    aoi_used: Value,
    model: Value,
    #[serde(flatten)]
    passthrough: Map<String, Value>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            experiment_name: Value::from(""),
            dataset_id: Value::from(""),
            user: Value::from(""),
            script_name: Value::from(""),
            aoi_used: Value::from(""),
            model: json!({
                "name": "",
                "version": "",
                "commit_hash": "",
            }),
            passthrough: Map::new(),
        }
    }
}

impl Metadata {
    /// Get the experiment name, if it is a string.
    #[must_use]
    pub fn experiment_name(&self) -> Option<&str> {
        self.experiment_name.as_str()
    }

    /// Get the dataset ID, if it is a string.
    #[must_use]
    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_str()
    }

    /// Get the user, if it is a string.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_str()
    }

    /// Get the script name, if it is a string.
    #[must_use]
    pub fn script_name(&self) -> Option<&str> {
        self.script_name.as_str()
    }

    /// Get the area of interest, if it is a string.
    #[must_use]
    pub fn aoi_used(&self) -> Option<&str> {
        self.aoi_used.as_str()
    }

    /// Get the raw model value (an object unless the caller replaced it).
    #[must_use]
    pub const fn model(&self) -> &Value {
        &self.model
    }

    /// Get a string field of the model object (`name`, `version`, `commit_hash`).
    #[must_use]
    pub fn model_field(&self, key: &str) -> Option<&str> {
        self.model.get(key).and_then(Value::as_str)
    }

    /// Get any metadata value by key, known or passed through.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match key {
            "experiment_name" => Some(&self.experiment_name),
            "dataset_id" => Some(&self.dataset_id),
            "user" => Some(&self.user),
            "script_name" => Some(&self.script_name),
            "aoi_used" => Some(&self.aoi_used),
            "model" => Some(&self.model),
            _ => self.passthrough.get(key),
        }
    }

    /// Keys supplied by the caller that are not part of the known shape.
    #[must_use]
    pub const fn passthrough(&self) -> &Map<String, Value> {
        &self.passthrough
    }

    fn apply(&mut self, key: &str, value: Value) {
        match key {
            "experiment_name" => self.experiment_name = value,
            "dataset_id" => self.dataset_id = value,
            "user" => self.user = value,
            "script_name" => self.script_name = value,
            "aoi_used" => self.aoi_used = value,
            "model" => match (&mut self.model, value) {
                (Value::Object(model), Value::Object(update)) => model.extend(update),
                (slot, other) => *slot = other,
            },
            _ => {
                self.passthrough.insert(key.to_owned(), value);
            }
        }
    }
}

/// Merge caller metadata over the default template.
///
/// Every supplied key overwrites its field, unknown keys included (they pass
/// through onto the record). A `model` object is merged key by key into the
/// default model; any other `model` value replaces it.
#[must_use]
pub fn merge_metadata(input: Option<&Value>) -> Metadata {
    let mut metadata = Metadata::default();
    if let Some(fields) = section_object(input, "metadata") {
        for (key, value) in fields {
            metadata.apply(key, value.clone());
        }
    }
    metadata
}
