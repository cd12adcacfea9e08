use anyhow::Result;
use std::path::Path;

use ecg_trials::output::MeanSnapshot;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        println!("Usage: {} <snapshot_file>", args[0]);
        std::process::exit(1);
    }

    let snapshot = MeanSnapshot::load(Path::new(&args[1]))?;

    println!("Labels: {:?}", snapshot.labels);
    if let (Some(first), Some(last)) = (snapshot.time_axis.first(), snapshot.time_axis.last()) {
        println!(
            "Time axis: {} samples spanning {:.4} s to {:.4} s",
            snapshot.time_axis.len(),
            first,
            last
        );
    }
    println!(
        "Mean matrix: {} labels x {} samples",
        snapshot.mean_matrix.len(),
        snapshot.mean_matrix.first().map_or(0, |row| row.len())
    );

    Ok(())
}
