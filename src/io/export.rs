//! JSON artifact writers.
//!
//! Artifacts are pretty-printed so they diff cleanly in version control.
//! `serde_json` writes non-finite floats as `null`, which is how unavailable
//! statistics reach consumers.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Serialize `value` to `path`, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    ensure_parent_dir(path)?;
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::output(format!("Failed to write JSON '{}': {e}", path.display())))?;
    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush JSON '{}': {e}", path.display())))?;

    Ok(())
}

/// Create the directory that will hold `path`.
pub fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => create_dir_all(dir)
            .map_err(|e| AppError::output(format!("Failed to create directory '{}': {e}", dir.display()))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        value: f64,
        missing: Option<f64>,
    }

    #[test]
    fn writes_nested_path_and_nulls_non_finite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        write_json(&path, &Sample { value: f64::NAN, missing: None }).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(parsed["value"].is_null());
        assert!(parsed["missing"].is_null());
    }
}
