use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::AggregateCurve;

/// Write the per-label aggregate curves to one CSV: a time column followed by
/// `<label>_mean` / `<label>_std` column pairs. NaN cells (no data at that
/// column) are written as empty fields so downstream plotting can gap them.
pub fn write_aggregates_to_csv(
    base_path: &str,
    subject_id: &str,
    time_axis: &[f64],
    curves: &BTreeMap<String, AggregateCurve>,
) -> Result<()> {
    let path = Path::new(base_path);
    let dir = path.parent().unwrap_or(Path::new("."));

    // Create directory if it doesn't exist
    std::fs::create_dir_all(dir)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("results");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("csv");

    let filename = format!("{}_{}_aggregates.{}", stem, subject_id, ext);
    let full_path = dir.join(filename);

    println!("Writing aggregate curves to {}", full_path.display());
    let file = File::create(full_path)?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header = vec!["time".to_string()];
    for label in curves.keys() {
        header.push(format!("{}_mean", label));
        header.push(format!("{}_std", label));
    }
    writer.write_record(&header)?;

    let format_cell = |v: f64| {
        if v.is_nan() {
            String::new()
        } else {
            v.to_string()
        }
    };

    for (i, t) in time_axis.iter().enumerate() {
        let mut record = vec![t.to_string()];
        for curve in curves.values() {
            record.push(format_cell(curve.mean[i]));
            record.push(format_cell(curve.std[i]));
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// The persisted artifact: label list, shared time axis, and one mean curve
/// per label. Stored as CBOR so every f64, NaN markers included, survives a
/// save/load cycle unchanged.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MeanSnapshot {
    pub labels: Vec<String>,
    pub time_axis: Vec<f64>,
    pub mean_matrix: Vec<Vec<f64>>,
}

impl MeanSnapshot {
    pub fn from_curves(time_axis: &[f64], curves: &BTreeMap<String, AggregateCurve>) -> Self {
        MeanSnapshot {
            labels: curves.keys().cloned().collect(),
            time_axis: time_axis.to_vec(),
            mean_matrix: curves.values().map(|c| c.mean.clone()).collect(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create snapshot: {}", path.display()))?;
        ciborium::into_writer(self, BufWriter::new(file))
            .with_context(|| format!("Failed to encode snapshot: {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<MeanSnapshot> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open snapshot: {}", path.display()))?;
        let snapshot = ciborium::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to decode snapshot: {}", path.display()))?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curves() -> BTreeMap<String, AggregateCurve> {
        let mut curves = BTreeMap::new();
        curves.insert(
            "N".to_string(),
            AggregateCurve {
                mean: vec![0.125, -3.0, f64::NAN],
                std: vec![0.5, 0.0, f64::NAN],
                trial_count: 2,
            },
        );
        curves.insert(
            "V".to_string(),
            AggregateCurve {
                mean: vec![1.0, 2.0, 3.0],
                std: vec![0.0, 0.0, 0.0],
                trial_count: 1,
            },
        );
        curves
    }

    #[test]
    fn snapshot_rows_follow_label_order() {
        let snapshot = MeanSnapshot::from_curves(&[-0.5, 0.0, 0.5], &curves());
        assert_eq!(snapshot.labels, vec!["N", "V"]);
        assert_eq!(snapshot.mean_matrix.len(), 2);
        assert_eq!(snapshot.mean_matrix[1], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn snapshot_round_trips_exactly() {
        let path = std::env::temp_dir().join("ecg_trials_snapshot_roundtrip.cbor");
        let snapshot = MeanSnapshot::from_curves(&[-0.5, 0.0, 0.5], &curves());
        snapshot.save(&path).unwrap();
        let loaded = MeanSnapshot::load(&path).unwrap();

        assert_eq!(loaded.labels, snapshot.labels);
        assert_eq!(loaded.time_axis, snapshot.time_axis);
        for (row, original_row) in loaded.mean_matrix.iter().zip(&snapshot.mean_matrix) {
            for (a, b) in row.iter().zip(original_row) {
                if b.is_nan() {
                    assert!(a.is_nan());
                } else {
                    assert_eq!(a, b);
                }
            }
        }
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn csv_export_writes_one_file_per_subject() {
        let dir = std::env::temp_dir().join("ecg_trials_csv_test");
        let base = dir.join("results.csv");
        write_aggregates_to_csv(base.to_str().unwrap(), "e0103", &[-0.5, 0.0, 0.5], &curves())
            .unwrap();

        let contents = std::fs::read_to_string(dir.join("results_e0103_aggregates.csv")).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "time,N_mean,N_std,V_mean,V_std");
        assert_eq!(lines.next().unwrap(), "-0.5,0.125,0.5,1,0");
        // NaN cells become empty fields.
        assert_eq!(lines.nth(1).unwrap(), "0.5,,,3,0");
        std::fs::remove_dir_all(&dir).ok();
    }
}
