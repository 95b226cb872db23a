use clap::Parser;
use std::path::PathBuf;

/// Render per-flow metric charts from a simulation results file.
#[derive(Parser)]
#[command(about, long_about = None)]
pub struct FlowReporterCli {
    /// Path to the CSV results file written by the simulation run
    pub input: PathBuf,

    /// Directory to write the chart images into.
    ///
    /// Created if it does not exist. Charts left by a previous run are
    /// overwritten.
    #[clap(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}
