use std::collections::BTreeMap;

use log::debug;
use ndarray::{Array2, Axis};

use crate::error::InvalidInputError;
use crate::trial_extraction::extract_trials;
use crate::windowing::compute_window;
use crate::{AggregateCurve, Event, TrialWindow};

/// Time axis shared by every trial, in seconds relative to the event. The
/// first entry is the window offset, so a centered window spans
/// [-duration/2, +duration/2).
pub fn trial_time_axis(window: &TrialWindow, fs: f64) -> Vec<f64> {
    let count = window.length_samples(fs);
    (0..count)
        .map(|i| window.offset_seconds + i as f64 / fs)
        .collect()
}

fn validate(
    signal: &[f64],
    label_samples: &[i64],
    label_symbols: &[String],
    window: &TrialWindow,
    fs: f64,
) -> Result<(), InvalidInputError> {
    if !(fs > 0.0) || !fs.is_finite() {
        return Err(InvalidInputError::NonPositiveSamplingRate(fs));
    }
    if !(window.duration_seconds > 0.0) {
        return Err(InvalidInputError::NonPositiveDuration(window.duration_seconds));
    }
    if signal.is_empty() {
        return Err(InvalidInputError::EmptySignal);
    }
    if label_samples.len() != label_symbols.len() {
        return Err(InvalidInputError::MismatchedEventArrays {
            samples: label_samples.len(),
            labels: label_symbols.len(),
        });
    }
    Ok(())
}

/// Trial matrix for a single label, one row per matching event in
/// chronological order. Fails before extraction if the inputs are malformed
/// or no event carries the label.
pub fn label_trial_matrix(
    signal: &[f64],
    label_samples: &[i64],
    label_symbols: &[String],
    label: &str,
    window: &TrialWindow,
    fs: f64,
) -> Result<Array2<f64>, InvalidInputError> {
    validate(signal, label_samples, label_symbols, window, fs)?;

    let offset = window.offset_samples(fs);
    let count = window.length_samples(fs);
    let starts: Vec<i64> = label_samples
        .iter()
        .zip(label_symbols.iter())
        .filter(|(_, symbol)| symbol.as_str() == label)
        .map(|(&sample, _)| compute_window(sample, offset, count).0)
        .collect();
    if starts.is_empty() {
        return Err(InvalidInputError::EmptyLabel(label.to_string()));
    }

    debug!(
        "label {:?}: {} trials of {} samples (offset {})",
        label,
        starts.len(),
        count,
        offset
    );
    Ok(extract_trials(signal, &starts, count))
}

/// Column-wise NaN-aware mean and population standard deviation. Columns
/// where every trial fell outside the recording stay NaN.
pub fn reduce_trials(trials: &Array2<f64>) -> AggregateCurve {
    let mut mean = Vec::with_capacity(trials.ncols());
    let mut std = Vec::with_capacity(trials.ncols());

    for column in trials.axis_iter(Axis(1)) {
        let valid: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
        if valid.is_empty() {
            mean.push(f64::NAN);
            std.push(f64::NAN);
            continue;
        }
        let n = valid.len() as f64;
        let m = valid.iter().sum::<f64>() / n;
        let variance = valid
            .iter()
            .map(|&x| {
                let diff = x - m;
                diff * diff
            })
            .sum::<f64>()
            / n;
        mean.push(m);
        std.push(variance.sqrt());
    }

    AggregateCurve {
        mean,
        std,
        trial_count: trials.nrows(),
    }
}

/// Group events by label, extract each label's trial matrix, and reduce it
/// to mean/std curves. Labels come back in lexicographic order so output
/// files and snapshots are reproducible across runs.
pub fn aggregate_by_label(
    signal: &[f64],
    label_samples: &[i64],
    label_symbols: &[String],
    window: &TrialWindow,
    fs: f64,
) -> Result<BTreeMap<String, AggregateCurve>, InvalidInputError> {
    validate(signal, label_samples, label_symbols, window, fs)?;

    let offset = window.offset_samples(fs);
    let count = window.length_samples(fs);
    let events = Event::zip(label_samples, label_symbols);
    let mut grouped: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for event in &events {
        grouped
            .entry(event.label.clone())
            .or_default()
            .push(compute_window(event.sample, offset, count).0);
    }

    let mut curves = BTreeMap::new();
    for (label, starts) in grouped {
        let trials = extract_trials(signal, &starts, count);
        debug!(
            "label {:?}: reduced {} x {} trial matrix",
            label,
            trials.nrows(),
            trials.ncols()
        );
        curves.insert(label, reduce_trials(&trials));
    }

    Ok(curves)
}
