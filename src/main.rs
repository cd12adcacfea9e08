use clap::Parser;
use log::debug;
use std::collections::BTreeMap;

use ecg_trials::aggregation::{
    aggregate_by_label, label_trial_matrix, reduce_trials, trial_time_axis,
};
use ecg_trials::config::Args;
use ecg_trials::data_loading::Recording;
use ecg_trials::output::{write_aggregates_to_csv, MeanSnapshot};
use ecg_trials::{AggregateCurve, TrialWindow};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();

    println!("Loading recording: {}", args.input_path.display());
    let recording = Recording::load(&args.input_path)?;
    println!(
        "Subject {} electrode {}: {} samples at {} Hz ({:.1} s), {} annotated beats",
        recording.subject_id,
        recording.electrode,
        recording.ecg_voltage.len(),
        recording.fs,
        recording.duration_seconds(),
        recording.label_samples.len()
    );

    let window = TrialWindow::new(args.offset, args.duration);
    let trial_sample_count = window.length_samples(recording.fs);
    debug!(
        "window: offset {} samples, {} samples per trial",
        window.offset_samples(recording.fs),
        trial_sample_count
    );

    let curves: BTreeMap<String, AggregateCurve> = if args.label.is_empty() {
        aggregate_by_label(
            &recording.ecg_voltage,
            &recording.label_samples,
            &recording.label_symbols,
            &window,
            recording.fs,
        )?
    } else {
        // Explicit label filter: extract each requested label on its own so
        // an unknown symbol fails loudly instead of vanishing from the output.
        let mut curves = BTreeMap::new();
        for label in &args.label {
            let trials = label_trial_matrix(
                &recording.ecg_voltage,
                &recording.label_samples,
                &recording.label_symbols,
                label,
                &window,
                recording.fs,
            )?;
            curves.insert(label.clone(), reduce_trials(&trials));
        }
        curves
    };

    for (label, curve) in &curves {
        println!(
            "Label {:?}: {} trials x {} samples",
            label, curve.trial_count, trial_sample_count
        );
    }

    let time_axis = trial_time_axis(&window, recording.fs);

    if let Some(csv_output) = &args.csv_output {
        write_aggregates_to_csv(csv_output, &recording.subject_id, &time_axis, &curves)?;
    }

    if let Some(snapshot_output) = &args.snapshot_output {
        let snapshot = MeanSnapshot::from_curves(&time_axis, &curves);
        snapshot.save(snapshot_output)?;
        println!("Wrote mean snapshot to {}", snapshot_output.display());
    }

    Ok(())
}
