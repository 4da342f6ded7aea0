//! End-to-end derive runs against a temporary directory.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use housing_insights::app::pipeline::{run_derive, run_validate};
use housing_insights::domain::PipelineConfig;
use housing_insights::error::ErrorKind;
use serde_json::Value;
use tempfile::TempDir;

const HEADER: &str = "year,borough,median_rent,median_income,subway_access_score,air_quality_index";

/// Four regions over 2016–2023 with non-collinear covariates.
fn write_panel(path: &Path) {
    let regions = ["Bronx", "Brooklyn", "Queens", "Manhattan"];
    let mut csv = format!("# synthetic panel for tests\n{HEADER}\n");
    for (r, name) in regions.iter().enumerate() {
        for t in 0..8 {
            let (rf, tf) = (r as f64, t as f64);
            let income = 45_000.0 + 9_000.0 * rf + 1_100.0 * tf + ((r * 7 + t * 3) % 5) as f64 * 400.0;
            let transit = 60.0 + 8.0 * rf - 0.4 * tf + ((r + t) % 3) as f64 * 1.5;
            let air = 48.0 - 2.5 * rf + 0.3 * tf + ((r * 2 + t) % 4) as f64;
            let rent = 600.0 + 0.025 * income + 9.0 * transit + 5.0 * (100.0 - air) + ((r * 3 + t * 5) % 7) as f64 * 20.0;
            writeln!(csv, "{},{name},{rent:.2},{income:.0},{transit:.2},{air:.2}", 2016 + t).unwrap();
        }
    }
    fs::write(path, csv).unwrap();
}

fn config(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        data_path: dir.path().join("data/panel.csv"),
        derived_out: dir.path().join("out/derived_summary.json"),
        payload_out: dir.path().join("out/viz_payload.json"),
        appendix_out: dir.path().join("appendix/ols_report.md"),
        print_summary: false,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn run_writes_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);
    fs::create_dir_all(cfg.data_path.parent().unwrap()).unwrap();
    write_panel(&cfg.data_path);

    let run = run_derive(&cfg).unwrap();
    assert_eq!(run.latest_year, 2023);
    assert_eq!(run.regression.window_years, vec![2019, 2020, 2021, 2022, 2023]);
    assert_eq!(run.regression.observation_count, 20);

    let derived = read_json(&cfg.derived_out);
    for key in [
        "generated_at",
        "latest_year",
        "rent_growth",
        "income_growth",
        "yoy",
        "latest_rows",
        "correlations",
        "regression",
        "disparity_index",
        "headlines",
    ] {
        assert!(derived.get(key).is_some(), "derived summary missing `{key}`");
    }
    assert_eq!(derived["latest_rows"][0]["region"], "Manhattan");

    let viz = read_json(&cfg.payload_out);
    assert_eq!(viz["scatter"].as_array().unwrap().len(), 32);
    assert_eq!(viz["heatmap"]["matrix"].as_array().unwrap().len(), 4);
    assert!(viz["heatmap"]["matrix"][0][0].is_null());
    assert_eq!(viz["series"]["Queens"]["year"].as_array().unwrap().len(), 8);

    let appendix = fs::read_to_string(&cfg.appendix_out).unwrap();
    assert!(appendix.starts_with("# OLS Appendix"));
}

#[test]
fn missing_input_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    let err = run_derive(&cfg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);
    assert_eq!(err.exit_code(), 2);
    assert!(!cfg.derived_out.exists());
}

#[test]
fn short_history_fails_with_insufficient_data() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);
    fs::create_dir_all(cfg.data_path.parent().unwrap()).unwrap();
    fs::write(
        &cfg.data_path,
        format!("{HEADER}\n2021,Solo,1000,50000,60,40\n2022,Solo,1050,52000,61,39\n2023,Solo,1100,53500,63,39.5\n"),
    )
    .unwrap();

    let err = run_derive(&cfg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
    assert_eq!(err.exit_code(), 3);
    assert!(!cfg.derived_out.exists());
}

#[test]
fn validate_flags_out_of_bounds_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.csv");
    write_panel(&path);
    assert!(run_validate(&path).is_ok());

    fs::write(&path, format!("{HEADER}\n2021,A,50,50000,60,40\n")).unwrap();
    let err = run_validate(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}
