use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::InvalidInputError;

/// On-disk CBOR container for one annotated recording. The voltage trace is
/// stored as raw little-endian f64 bytes so it round-trips bit-exactly.
#[derive(Debug, Serialize, Deserialize)]
struct RecordingFile {
    subject_id: String,
    electrode: String,
    units: String,
    fs: f64,
    #[serde(with = "serde_bytes")]
    ecg_voltage: Vec<u8>,
    label_samples: Vec<i64>,
    label_symbols: Vec<String>,
}

/// A decoded single-channel ECG recording with its beat annotations.
/// Annotations are parallel arrays: `label_samples[i]` is the sample index
/// of the i-th beat, `label_symbols[i]` its category.
#[derive(Debug, Clone)]
pub struct Recording {
    pub subject_id: String,
    pub electrode: String,
    pub units: String,
    pub fs: f64,
    pub ecg_voltage: Vec<f64>,
    pub label_samples: Vec<i64>,
    pub label_symbols: Vec<String>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Recording> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open recording: {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let raw: RecordingFile = ciborium::from_reader(&mut reader)
            .with_context(|| format!("Failed to decode recording: {}", path.display()))?;

        let ecg_voltage: Vec<f64> = raw
            .ecg_voltage
            .chunks_exact(8)
            .map(|chunk| {
                f64::from_le_bytes([
                    chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
                ])
            })
            .collect();

        let recording = Recording {
            subject_id: raw.subject_id,
            electrode: raw.electrode,
            units: raw.units,
            fs: raw.fs,
            ecg_voltage,
            label_samples: raw.label_samples,
            label_symbols: raw.label_symbols,
        };
        recording.validate()?;
        debug!(
            "loaded subject {} electrode {}: {} samples at {} Hz, {} events",
            recording.subject_id,
            recording.electrode,
            recording.ecg_voltage.len(),
            recording.fs,
            recording.label_samples.len()
        );
        Ok(recording)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let mut ecg_voltage = Vec::with_capacity(self.ecg_voltage.len() * 8);
        for &sample in &self.ecg_voltage {
            ecg_voltage.extend_from_slice(&sample.to_le_bytes());
        }
        let raw = RecordingFile {
            subject_id: self.subject_id.clone(),
            electrode: self.electrode.clone(),
            units: self.units.clone(),
            fs: self.fs,
            ecg_voltage,
            label_samples: self.label_samples.clone(),
            label_symbols: self.label_symbols.clone(),
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create recording: {}", path.display()))?;
        ciborium::into_writer(&raw, BufWriter::new(file))
            .with_context(|| format!("Failed to encode recording: {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<(), InvalidInputError> {
        if self.ecg_voltage.is_empty() {
            return Err(InvalidInputError::EmptySignal);
        }
        if !(self.fs > 0.0) || !self.fs.is_finite() {
            return Err(InvalidInputError::NonPositiveSamplingRate(self.fs));
        }
        if self.label_samples.len() != self.label_symbols.len() {
            return Err(InvalidInputError::MismatchedEventArrays {
                samples: self.label_samples.len(),
                labels: self.label_symbols.len(),
            });
        }
        Ok(())
    }

    /// Recording-wide time axis in seconds, one entry per voltage sample.
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.ecg_voltage.len())
            .map(|i| i as f64 / self.fs)
            .collect()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.ecg_voltage.len() as f64 / self.fs
    }
}
