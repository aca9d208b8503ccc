//! Parameters section - training/evaluation hyperparameters

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::section_object;

/// Key of the bucket that collects unrecognized parameters.
const EXTRA_KEY: &str = "extra";

/// Run parameters.
///
/// Numeric hyperparameters default to `null`, strings to `""` and
/// `input_features` to `[]`. Parameters the template does not know about are
/// collected in `extra` instead of being placed at the top level. `extra`
/// is itself a known field: a caller value for it is stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    model_type: Value,
    learning_rate: Value,
    batch_size: Value,
    epochs: Value,
    loss_function: Value,
    optimizer: Value,
    input_features: Value,
    extra: Value,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            model_type: Value::from(""),
            learning_rate: Value::Null,
            batch_size: Value::Null,
            epochs: Value::Null,
            loss_function: Value::from(""),
            optimizer: Value::from(""),
            input_features: Value::Array(Vec::new()),
            extra: Value::Object(Map::new()),
        }
    }
}

impl Parameters {
    /// Names of the recognized parameters (including the `extra` bucket).
    pub const KNOWN: [&'static str; 8] = [
        "model_type",
        "learning_rate",
        "batch_size",
        "epochs",
        "loss_function",
        "optimizer",
        "input_features",
        EXTRA_KEY,
    ];

    /// Get the model type, if it is a string.
    #[must_use]
    pub fn model_type(&self) -> Option<&str> {
        self.model_type.as_str()
    }

    /// Get the learning rate, if set to a number.
    #[must_use]
    pub fn learning_rate(&self) -> Option<f64> {
        self.learning_rate.as_f64()
    }

    /// Get the batch size, if set to a non-negative integer.
    #[must_use]
    pub fn batch_size(&self) -> Option<u64> {
        self.batch_size.as_u64()
    }

    /// Get the number of epochs, if set to a non-negative integer.
    #[must_use]
    pub fn epochs(&self) -> Option<u64> {
        self.epochs.as_u64()
    }

    /// Get the loss function, if it is a string.
    #[must_use]
    pub fn loss_function(&self) -> Option<&str> {
        self.loss_function.as_str()
    }

    /// Get the optimizer, if it is a string.
    #[must_use]
    pub fn optimizer(&self) -> Option<&str> {
        self.optimizer.as_str()
    }

    /// Get the input feature names that are strings, in order.
    #[must_use]
    pub fn input_features(&self) -> Vec<&str> {
        self.input_features
            .as_array()
            .map(|features| features.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Get a recognized parameter's raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match key {
            "model_type" => Some(&self.model_type),
            "learning_rate" => Some(&self.learning_rate),
            "batch_size" => Some(&self.batch_size),
            "epochs" => Some(&self.epochs),
            "loss_function" => Some(&self.loss_function),
            "optimizer" => Some(&self.optimizer),
            "input_features" => Some(&self.input_features),
            EXTRA_KEY => Some(&self.extra),
            _ => None,
        }
    }

    /// Unrecognized parameters, in the order they were supplied.
    ///
    /// `None` if the caller replaced `extra` with a non-object value.
    #[must_use]
    pub const fn extra(&self) -> Option<&Map<String, Value>> {
        match &self.extra {
            Value::Object(extra) => Some(extra),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Value> {
        match key {
            "model_type" => Some(&mut self.model_type),
            "learning_rate" => Some(&mut self.learning_rate),
            "batch_size" => Some(&mut self.batch_size),
            "epochs" => Some(&mut self.epochs),
            "loss_function" => Some(&mut self.loss_function),
            "optimizer" => Some(&mut self.optimizer),
            "input_features" => Some(&mut self.input_features),
            _ => None,
        }
    }
}

/// Merge caller parameters over the default template.
///
/// Recognized keys overwrite their field, `extra` included: a caller `extra`
/// replaces the bucket as given, before any other key is considered. Every
/// other key goes into the bucket while it is an object; once the caller has
/// replaced it with a non-object value, unknown keys are dropped.
#[must_use]
pub fn merge_parameters(input: Option<&Value>) -> Parameters {
    let mut parameters = Parameters::default();
    let Some(fields) = section_object(input, "parameters") else {
        return parameters;
    };

    if let Some(extra) = fields.get(EXTRA_KEY) {
        parameters.extra = extra.clone();
    }

    for (key, value) in fields {
        if key == EXTRA_KEY {
            continue;
        }
        if let Some(slot) = parameters.slot_mut(key) {
            *slot = value.clone();
        } else if let Value::Object(bucket) = &mut parameters.extra {
            bucket.insert(key.clone(), value.clone());
        } else {
            tracing::debug!(parameter = %key, "dropping parameter, `extra` is not an object");
        }
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameters_defaults() {
        let parameters = merge_parameters(None);
        assert_eq!(parameters.model_type(), Some(""));
        assert_eq!(parameters.get("learning_rate"), Some(&Value::Null));
        assert_eq!(parameters.get("batch_size"), Some(&Value::Null));
        assert_eq!(parameters.get("epochs"), Some(&Value::Null));
        assert!(parameters.input_features().is_empty());
        assert_eq!(parameters.extra().map(Map::len), Some(0));
    }

    #[test]
    fn test_parameters_bucketing() {
        let input = json!({"epochs": 10, "custom_flag": true});
        let parameters = merge_parameters(Some(&input));

        assert_eq!(parameters.epochs(), Some(10));
        assert_eq!(parameters.extra().unwrap().get("custom_flag"), Some(&json!(true)));
        assert_eq!(parameters.get("custom_flag"), None);

        let value = serde_json::to_value(&parameters).unwrap();
        assert!(value.get("custom_flag").is_none());
        assert_eq!(value["extra"]["custom_flag"], json!(true));
    }

    #[test]
    fn test_parameters_known_values() {
        let input = json!({
            "model_type": "unet",
            "learning_rate": 0.001,
            "batch_size": 16,
            "loss_function": "bce",
            "optimizer": "adam",
            "input_features": ["dem", "slope", "hand"]
        });
        let parameters = merge_parameters(Some(&input));

        assert_eq!(parameters.model_type(), Some("unet"));
        assert_eq!(parameters.learning_rate(), Some(0.001));
        assert_eq!(parameters.batch_size(), Some(16));
        assert_eq!(parameters.loss_function(), Some("bce"));
        assert_eq!(parameters.optimizer(), Some("adam"));
        assert_eq!(parameters.input_features(), ["dem", "slope", "hand"]);
    }

    #[test]
    fn test_parameters_extra_object_replaces_bucket() {
        let input = json!({"seed": 7, "extra": {"note": "warm start"}});
        let parameters = merge_parameters(Some(&input));

        let extra = parameters.extra().unwrap();
        assert_eq!(extra.get("note"), Some(&json!("warm start")));
        assert_eq!(extra.get("seed"), Some(&json!(7)));
        assert!(extra.get("extra").is_none());
    }

    #[test]
    fn test_parameters_extra_non_object_stored_verbatim() {
        let input = json!({"seed": 7, "extra": "loose"});
        let parameters = merge_parameters(Some(&input));
        assert_eq!(parameters.get("extra"), Some(&json!("loose")));
        assert!(parameters.extra().is_none());

        let value = serde_json::to_value(&parameters).unwrap();
        assert_eq!(value["extra"], json!("loose"));
        assert!(value.get("seed").is_none());
    }

    #[test]
    fn test_parameters_extra_preserves_order() {
        let input = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let parameters = merge_parameters(Some(&input));
        let keys: Vec<&str> = parameters.extra().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }
}
