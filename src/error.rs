use thiserror::Error;

/// Input-shape problems that are rejected before any extraction runs.
/// Sparse trial data (cells outside the recording) is not an error; it is
/// carried as NaN all the way into the aggregate curves.
#[derive(Error, Debug)]
pub enum InvalidInputError {
    #[error("sampling rate must be positive and finite, got {0}")]
    NonPositiveSamplingRate(f64),
    #[error("trial duration must be positive, got {0} s")]
    NonPositiveDuration(f64),
    #[error("annotation arrays differ in length: {samples} sample indices vs {labels} labels")]
    MismatchedEventArrays { samples: usize, labels: usize },
    #[error("recording contains no voltage samples")]
    EmptySignal,
    #[error("no events carry label {0:?}")]
    EmptyLabel(String),
}
