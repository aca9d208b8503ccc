//! Experiment Logging Example
//!
//! Logs a parity run and a QC run into `logs/` and prints the files written.
//!
//! Run with: RUST_LOG=debug cargo run --example log_run

use serde_json::json;
use tracing_subscriber::EnvFilter;
use urbanist_explog::{ExperimentLogger, LogEntry, LogRecord};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Urbanist Experiment Log ===\n");

    let logger = ExperimentLogger::with_defaults()?;
    println!("Save dir: {}", logger.save_dir().display());
    println!("Schema:   {}\n", logger.schema_version());

    // -------------------------------------------------------------------------
    // 1. Parity run against the reference model
    // -------------------------------------------------------------------------
    let parity = LogEntry::new("parity")
        .metadata(json!({
            "experiment_name": "flood-depth-parity",
            "dataset_id": "harvey-2017",
            "user": "analyst",
            "script_name": "parity_check.py",
            "aoi_used": "houston_downtown",
            "model": {"name": "fathom-lite", "version": "0.3.1"}
        }))
        .parameters(json!({
            "model_type": "hydrodynamic",
            "input_features": ["dem", "rainfall", "landcover"],
            "tile_size": 512
        }))
        .data_sources(json!({
            "raster_files": ["data/dem_1m.tif", "data/rain_24h.tif"],
            "vector_files": ["data/aoi.geojson"]
        }))
        .metrics(json!({
            "mae": 0.082,
            "rmse": 0.131,
            "iou_flooded": 0.874,
            "iou_non_flooded": 0.962,
            "percent_area_misclassified": 3.4
        }))
        .artifact("outputs/depth_diff.tif");

    let path = logger.log(&parity)?;
    println!("1. Parity run -> {}", path.display());

    // -------------------------------------------------------------------------
    // 2. QC statistics of the produced raster
    // -------------------------------------------------------------------------
    let qc = LogEntry::new("qc")
        .metadata(json!({"dataset_id": "harvey-2017", "script_name": "qc_stats.py"}))
        .data_sources(json!({"raster_files": ["outputs/depth.tif"]}))
        .metrics(json!({
            "qc_min": 0.0,
            "qc_max": 4.71,
            "qc_mean": 0.63,
            "qc_p50": 0.41,
            "qc_total_pixels": 1_048_576,
            "qc_nodata_pixels": 20_480,
            "qc_nodata_percent": 1.95
        }));

    let path = logger.log(&qc)?;
    println!("2. QC run     -> {}", path.display());

    let record = LogRecord::read_from(&path)?;
    println!(
        "   run_id={} populated metrics={:?}",
        record.run_id(),
        record.results().metrics().populated()
    );

    Ok(())
}
