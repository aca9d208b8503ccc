//! Metrics section - parity and quality-control statistics
//!
//! The set of metric names is closed: a record carries exactly these fields,
//! each `null` until supplied.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::section_object;

macro_rules! metric_fields {
    ($( $(#[$doc:meta])* $name:ident ),+ $(,)?) => {
        /// Fixed set of run metrics, each independently nullable.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct Metrics {
            $( $(#[$doc])* $name: Value, )+
        }

        impl Default for Metrics {
            fn default() -> Self {
                Self {
                    $( $name: Value::Null, )+
                }
            }
        }

        impl Metrics {
            /// Names of every metric, in record order.
            pub const NAMES: &'static [&'static str] = &[$( stringify!($name) ),+];

            /// Get a metric's raw value; `None` if `key` is not a metric name.
            #[must_use]
            pub fn get(&self, key: &str) -> Option<&Value> {
                match key {
                    $( stringify!($name) => Some(&self.$name), )+
                    _ => None,
                }
            }

            fn slot_mut(&mut self, key: &str) -> Option<&mut Value> {
                match key {
                    $( stringify!($name) => Some(&mut self.$name), )+
                    _ => None,
                }
            }
        }
    };
}

metric_fields! {
    /// Mean absolute error against the reference.
    mae,
    /// Root mean squared error against the reference.
    rmse,
    /// Intersection over union of the flooded class.
    iou_flooded,
    /// Intersection over union of the non-flooded class.
    iou_non_flooded,
    percent_area_misclassified,

    qc_min,
    qc_max,
    qc_mean,
    qc_std,
    qc_p1,
    qc_p5,
    qc_p50,
    qc_p95,
    qc_p99,
    qc_skewness,
    qc_kurtosis,
    qc_mode,
    qc_unique_values,
    qc_outlier_count,
    qc_outlier_percent,

    qc_total_pixels,
    qc_nodata_pixels,
    qc_nodata_percent,
}

impl Metrics {
    /// Get a metric as a number, if it is set to one.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Check whether `key` is one of the known metric names.
    #[must_use]
    pub fn is_known(key: &str) -> bool {
        Self::NAMES.contains(&key)
    }

    /// Names of the metrics that have been set (non-null), in record order.
    #[must_use]
    pub fn populated(&self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .copied()
            .filter(|name| self.get(name).is_some_and(|v| !v.is_null()))
            .collect()
    }
}

/// Build the metrics of a run.
///
/// Keys that name a known metric overwrite it; every other key is discarded.
#[must_use]
pub fn merge_metrics(input: Option<&Value>) -> Metrics {
    let mut metrics = Metrics::default();
    if let Some(fields) = section_object(input, "metrics") {
        for (key, value) in fields {
            match metrics.slot_mut(key) {
                Some(slot) => *slot = value.clone(),
                None => tracing::trace!(metric = %key, "discarding unknown metric"),
            }
        }
    }
    metrics
}
