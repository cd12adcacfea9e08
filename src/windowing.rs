/// Half-open sample range of one trial: `start = event + offset`,
/// `end = start + length`. No bounds checking here; the extractor clamps
/// against the recording and pads what falls outside. Either endpoint may be
/// negative or past the end of the signal.
pub fn compute_window(event_sample: i64, offset_samples: i64, length_samples: usize) -> (i64, i64) {
    let start = event_sample + offset_samples;
    (start, start + length_samples as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrialWindow;

    #[test]
    fn window_is_half_open_and_offset_relative() {
        assert_eq!(compute_window(100, -25, 50), (75, 125));
        assert_eq!(compute_window(10, 0, 4), (10, 14));
    }

    #[test]
    fn window_may_leave_signal_bounds() {
        // Clamping is the extractor's job, so negative starts pass through.
        assert_eq!(compute_window(2, -10, 4), (-8, -4));
    }

    #[test]
    fn zero_length_window_is_empty() {
        let (start, end) = compute_window(7, 3, 0);
        assert_eq!(start, end);
    }

    #[test]
    fn trial_window_converts_seconds_to_samples() {
        let window = TrialWindow::new(-0.5, 1.0);
        assert_eq!(window.offset_samples(250.0), -125);
        assert_eq!(window.length_samples(250.0), 250);
    }

    #[test]
    fn trial_window_rounds_fractional_samples() {
        let window = TrialWindow::new(-0.1, 0.3);
        // 360 Hz: -36 samples offset, 108 samples long.
        assert_eq!(window.offset_samples(360.0), -36);
        assert_eq!(window.length_samples(360.0), 108);
    }
}
