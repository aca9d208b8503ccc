//! Property-based tests for the section merge policies and file naming
//!
//! - Test the invariants of each merge policy over arbitrary inputs
//! - Run with ProptestConfig::with_cases(100)
//! - Filesystem properties use fewer cases

use proptest::prelude::*;
use serde_json::{Map, Value};
use tempfile::TempDir;
use urbanist_explog::experiment::{
    merge_data_sources, merge_metadata, merge_metrics, merge_parameters, Metrics,
};
use urbanist_explog::{ExperimentLogger, LogEntry, LoggerConfig};

const METADATA_KEYS: &[&str] = &[
    "experiment_name",
    "dataset_id",
    "user",
    "script_name",
    "aoi_used",
    "model",
];

const PARAMETER_KEYS: &[&str] = &[
    "model_type",
    "learning_rate",
    "batch_size",
    "epochs",
    "loss_function",
    "optimizer",
    "input_features",
];

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate a JSON scalar of any kind
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z0-9 ./_]{0,16}".prop_map(Value::from),
    ]
}

/// Generate a section mapping mixing known and arbitrary keys
fn arb_section(known: &'static [&'static str]) -> impl Strategy<Value = Map<String, Value>> {
    let key = prop_oneof![
        proptest::sample::select(known).prop_map(str::to_owned),
        "[a-z_]{1,12}",
    ];
    proptest::collection::vec((key, arb_scalar()), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect::<Map<String, Value>>())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: metrics always serialize to exactly the known names
    #[test]
    fn prop_metrics_closed_set(input in arb_section(Metrics::NAMES)) {
        let metrics = merge_metrics(Some(&Value::Object(input.clone())));
        let value = serde_json::to_value(&metrics).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        prop_assert_eq!(keys, Metrics::NAMES);

        for (key, supplied) in &input {
            if Metrics::is_known(key) {
                prop_assert_eq!(metrics.get(key), Some(supplied));
            } else {
                prop_assert!(metrics.get(key).is_none());
            }
        }
    }

    /// Property: every parameter lands either in its field or in `extra`
    #[test]
    fn prop_parameters_known_or_bucketed(input in arb_section(PARAMETER_KEYS)) {
        let input: Map<String, Value> = input.into_iter().filter(|(k, _)| k != "extra").collect();
        let parameters = merge_parameters(Some(&Value::Object(input.clone())));
        let extra = parameters.extra().unwrap();

        for (key, supplied) in &input {
            if PARAMETER_KEYS.contains(&key.as_str()) {
                prop_assert_eq!(parameters.get(key), Some(supplied));
                prop_assert!(extra.get(key).is_none());
            } else {
                prop_assert_eq!(extra.get(key), Some(supplied));
            }
        }
        prop_assert_eq!(
            extra.len(),
            input.keys().filter(|k| !PARAMETER_KEYS.contains(&k.as_str())).count()
        );
    }

    /// Property: data sources never grow beyond the two recognized lists
    #[test]
    fn prop_data_sources_two_keys(input in arb_section(&["raster_files", "vector_files"])) {
        let sources = merge_data_sources(Some(&Value::Object(input.clone())));
        let value = serde_json::to_value(&sources).unwrap();
        prop_assert_eq!(value.as_object().unwrap().len(), 2);

        for key in ["raster_files", "vector_files"] {
            let expected = input.get(key).cloned().unwrap_or_else(|| Value::Array(Vec::new()));
            prop_assert_eq!(sources.get(key), Some(&expected));
        }
    }

    /// Property: every metadata key is kept, known or not
    #[test]
    fn prop_metadata_passthrough(input in arb_section(METADATA_KEYS)) {
        let metadata = merge_metadata(Some(&Value::Object(input.clone())));

        for (key, supplied) in &input {
            prop_assert_eq!(metadata.get(key), Some(supplied));
        }
        if !input.contains_key("model") {
            for field in ["name", "version", "commit_hash"] {
                prop_assert_eq!(metadata.model_field(field), Some(""));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: file names follow `<run_type>_<compact ts>_<8 hex>.json`
    #[test]
    fn prop_file_name_contract(run_type in "[a-z][a-z_]{0,11}") {
        let dir = TempDir::new().unwrap();
        let logger = ExperimentLogger::new(LoggerConfig::new(dir.path())).unwrap();

        let path = logger.log(&LogEntry::new(run_type.clone())).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap().to_owned();

        let prefix = format!("{run_type}_");
        prop_assert!(name.starts_with(&prefix));
        let rest = name[prefix.len()..].strip_suffix(".json").unwrap();
        let (compact, id) = rest.rsplit_once('_').unwrap();

        prop_assert_eq!(id.len(), 8);
        prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        prop_assert!(!compact.contains(':') && !compact.contains('-'));
        prop_assert!(compact.ends_with('Z'));
    }
}
