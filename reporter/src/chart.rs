use crate::frame::TIME;
use crate::model::{ChartOutput, Metric};
use itertools::{Itertools, MinMaxResult};
use plotters::prelude::*;
use polars::prelude::DataFrame;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Canvas size in pixels, keeping the 10:6 shape of the report figures.
pub(crate) const CANVAS_SIZE: (u32, u32) = (1000, 600);

#[derive(Error, Debug)]
#[error("Failed to render {metric} chart to {}", path.display())]
pub struct RenderError {
    pub metric: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Render the chart for one metric into `output_dir`, one line series per
/// flow, overwriting any previous chart at the same path.
pub(crate) fn render_metric_chart(
    metric: Metric,
    partitions: &[(String, DataFrame)],
    output_dir: &Path,
) -> Result<ChartOutput, RenderError> {
    let path = output_dir.join(metric.file_name());
    let (series, points) = draw(metric, partitions, &path).map_err(|source| RenderError {
        metric: metric.column(),
        path: path.clone(),
        source: source.into(),
    })?;

    Ok(ChartOutput {
        metric,
        path,
        series,
        points,
    })
}

fn draw(
    metric: Metric,
    partitions: &[(String, DataFrame)],
    path: &Path,
) -> anyhow::Result<(usize, usize)> {
    let mut series = Vec::with_capacity(partitions.len());
    for (flow_id, part) in partitions {
        series.push((flow_id.as_str(), series_points(part, metric.column())?));
    }

    let x_range = axis_range(series.iter().flat_map(|(_, points)| points.iter().map(|p| p.0)));
    let y_range = axis_range(series.iter().flat_map(|(_, points)| points.iter().map(|p| p.1)));

    let root = BitMapBackend::new(path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(metric.title(), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc(metric.y_label())
        .draw()?;

    let mut total_points = 0;
    for (idx, (flow_id, points)) in series.iter().enumerate() {
        total_points += points.len();
        let color = Palette99::pick(idx);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &color))?
            .label(format!("Flow ID {flow_id}"))
            .legend(move |(x, y)| {
                let color = Palette99::pick(idx);
                PathElement::new(vec![(x, y), (x + 20, y)], &color)
            });
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;

    Ok((series.len(), total_points))
}

/// Extract the (time, value) points of one flow's series.
///
/// Rows are already time-ordered; null cells are skipped.
fn series_points(frame: &DataFrame, column: &str) -> anyhow::Result<Vec<(f64, f64)>> {
    let times = frame.column(TIME)?.f64()?;
    let values = frame.column(column)?.f64()?;

    Ok(times
        .into_iter()
        .zip(values)
        .filter_map(|(time, value)| Some((time?, value?)))
        .collect())
}

fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    match values.minmax() {
        MinMaxResult::NoElements => 0.0..1.0,
        MinMaxResult::OneElement(value) => pad_range(value, value),
        MinMaxResult::MinMax(min, max) => pad_range(min, max),
    }
}

fn pad_range(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span <= f64::EPSILON {
        (min - 0.5)..(max + 0.5)
    } else {
        (min - span * 0.05)..(max + span * 0.05)
    }
}
