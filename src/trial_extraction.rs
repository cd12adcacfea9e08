use log::trace;
use ndarray::{s, Array2};

/// Cut one fixed-length trial per start index out of the signal.
///
/// The output always has shape `(trial_starts.len(), trial_sample_count)`,
/// one row per start in input order. Cells that fall outside the recording
/// are NaN; the valid slice keeps its event-relative column so a window that
/// begins before sample 0 gets leading NaNs, and one that runs past the end
/// gets trailing NaNs. A window entirely outside the recording yields an
/// all-NaN row, never an error.
pub fn extract_trials(
    signal: &[f64],
    trial_starts: &[i64],
    trial_sample_count: usize,
) -> Array2<f64> {
    let n_samples = signal.len() as i64;
    let mut trials = Array2::from_elem((trial_starts.len(), trial_sample_count), f64::NAN);

    for (row, &start) in trial_starts.iter().enumerate() {
        let end = start + trial_sample_count as i64;
        let valid_start = start.max(0).min(n_samples);
        let valid_end = end.max(0).min(n_samples);
        if valid_start >= valid_end {
            trace!("trial {} at start {} has no overlap with signal", row, start);
            continue;
        }

        let col = (valid_start - start) as usize;
        let valid_len = (valid_end - valid_start) as usize;
        let source = &signal[valid_start as usize..valid_end as usize];
        trials
            .slice_mut(s![row, col..col + valid_len])
            .assign(&ndarray::ArrayView1::from(source));
    }

    trials
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn fully_in_range_trial_equals_signal_slice() {
        let signal = ramp(10);
        let trials = extract_trials(&signal, &[5], 4);
        assert_eq!(trials.shape(), &[1, 4]);
        assert_eq!(trials.row(0).to_vec(), vec![5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn trailing_overrun_pads_end_with_nan() {
        let signal = ramp(10);
        let trials = extract_trials(&signal, &[8], 4);
        let row = trials.row(0);
        assert_eq!(row[0], 8.0);
        assert_eq!(row[1], 9.0);
        assert!(row[2].is_nan());
        assert!(row[3].is_nan());
    }

    #[test]
    fn leading_overrun_pads_start_with_nan() {
        let signal = ramp(10);
        let trials = extract_trials(&signal, &[-2], 4);
        let row = trials.row(0);
        assert!(row[0].is_nan());
        assert!(row[1].is_nan());
        assert_eq!(row[2], 0.0);
        assert_eq!(row[3], 1.0);
    }

    #[test]
    fn fully_out_of_range_trial_is_all_nan() {
        let signal = ramp(10);
        for start in [-20i64, 10, 100] {
            let trials = extract_trials(&signal, &[start], 4);
            assert_eq!(trials.shape(), &[1, 4]);
            assert!(trials.row(0).iter().all(|v| v.is_nan()));
        }
    }

    #[test]
    fn shape_is_preserved_regardless_of_out_of_range_rows() {
        let signal = ramp(10);
        let starts = vec![-7, 0, 3, 9, 42];
        let trials = extract_trials(&signal, &starts, 5);
        assert_eq!(trials.shape(), &[5, 5]);
        // The in-range row survives untouched.
        assert_eq!(trials.row(2).to_vec(), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn no_starts_yields_zero_row_matrix() {
        let trials = extract_trials(&ramp(10), &[], 4);
        assert_eq!(trials.shape(), &[0, 4]);
    }

    #[test]
    fn zero_length_trials_yield_zero_column_matrix() {
        let trials = extract_trials(&ramp(10), &[2, 5], 0);
        assert_eq!(trials.shape(), &[2, 0]);
    }
}
