//! Chart generation for per-flow network simulation results.
//!
//! A simulation run leaves behind one CSV file with a row per flow sample:
//! the flow identifier, the sample time and the packet loss, throughput
//! and delay measured at that time. [`generate_reports`] turns that file
//! into three line-chart images, one per metric, with one series per flow.

use crate::model::{ChartOutput, Metric};
use anyhow::{anyhow, Context};
use std::path::Path;

pub mod chart;
pub mod cli;
mod frame;
pub mod model;
mod partition;

pub use chart::RenderError;
pub use frame::DataLoadError;

/// Generate the three metric charts for the results file at `input`.
///
/// Charts are written into `output_dir` (created if absent). A failure to
/// load the input aborts before anything is written; a failure to render
/// one chart is reported after the remaining charts have been attempted
/// and does not remove charts that were already written.
pub fn generate_reports(input: &Path, output_dir: &Path) -> anyhow::Result<Vec<ChartOutput>> {
    let frame = frame::load_flow_stats(input)?;
    let partitions = partition::partition_by_flow(frame)?;
    log::info!("Loaded {} flows from {}", partitions.len(), input.display());

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut outputs = Vec::with_capacity(Metric::ALL.len());
    let mut errors = vec![];
    for metric in Metric::ALL {
        match chart::render_metric_chart(metric, &partitions, output_dir) {
            Ok(output) => {
                log::info!(
                    "Wrote {} chart with {} series to {}",
                    output.metric,
                    output.series,
                    output.path.display()
                );
                outputs.push(output);
            }
            Err(e) => {
                errors.push(e);
            }
        }
    }

    // If any chart failed, surface all failures together; the charts that
    // did render stay on disk.
    if !errors.is_empty() {
        return Err(anyhow!(
            "{} out of {} charts failed:\n{:#?}",
            errors.len(),
            Metric::ALL.len(),
            errors
        ));
    }

    Ok(outputs)
}
