use clap::Parser;
use std::path::PathBuf;

/// Extract per-beat trials from an annotated ECG recording and aggregate
/// them into per-label mean/std curves
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a CBOR ECG recording file
    #[arg(help = "Path to a CBOR ECG recording file")]
    pub input_path: PathBuf,

    /// Trial start relative to each event, in seconds (negative starts before the beat)
    #[arg(long, default_value = "-0.5", allow_hyphen_values = true)]
    pub offset: f64,

    /// Trial duration in seconds
    #[arg(long, default_value = "1.0")]
    pub duration: f64,

    /// CSV output file prefix (e.g. /path/to/output/prefix.csv)
    #[arg(long)]
    pub csv_output: Option<String>,

    /// Path for the CBOR mean-curve snapshot
    #[arg(long)]
    pub snapshot_output: Option<PathBuf>,

    /// Restrict aggregation to these beat labels (repeatable); default is every label present
    #[arg(long)]
    pub label: Vec<String>,
}
