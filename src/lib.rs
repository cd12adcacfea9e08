pub mod aggregation;
pub mod config;
pub mod data_loading;
pub mod error;
pub mod output;
pub mod trial_extraction;
pub mod windowing;

/// One annotated beat: the sample index where it was detected plus the
/// categorical symbol the annotator assigned (e.g. "N" for normal, "V" for
/// ventricular).
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub sample: i64,
    pub label: String,
}

impl Event {
    /// Zip the parallel annotation arrays into event pairs. Callers are
    /// expected to have validated that the arrays are the same length.
    pub fn zip(samples: &[i64], labels: &[String]) -> Vec<Event> {
        samples
            .iter()
            .zip(labels.iter())
            .map(|(&sample, label)| Event {
                sample,
                label: label.clone(),
            })
            .collect()
    }
}

/// Where a trial sits relative to its event, in seconds. An offset of
/// -duration/2 centers the window on the beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialWindow {
    pub offset_seconds: f64,
    pub duration_seconds: f64,
}

impl TrialWindow {
    pub fn new(offset_seconds: f64, duration_seconds: f64) -> Self {
        TrialWindow {
            offset_seconds,
            duration_seconds,
        }
    }

    /// Window start relative to the event, in samples. May be negative.
    pub fn offset_samples(&self, fs: f64) -> i64 {
        (fs * self.offset_seconds).round() as i64
    }

    /// Number of samples per trial.
    pub fn length_samples(&self, fs: f64) -> usize {
        (fs * self.duration_seconds).round().max(0.0) as usize
    }
}

/// Column-wise reduction of one label's trial matrix. Both curves are
/// trial_sample_count long; a column with no valid samples stays NaN.
#[derive(Debug, Clone)]
pub struct AggregateCurve {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    pub trial_count: usize,
}
