use crate::model::Metric;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Column holding the identifier of the flow each row belongs to.
pub(crate) const FLOW_ID: &str = "FlowId";
/// Column holding the sample time in seconds.
pub(crate) const TIME: &str = "Time";

/// Columns a results file must carry.
fn required_columns() -> impl Iterator<Item = &'static str> {
    [FLOW_ID, TIME]
        .into_iter()
        .chain(Metric::ALL.iter().map(|metric| metric.column()))
}

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to read simulation results from {path}: {source}")]
    Unreadable { path: String, source: PolarsError },
    #[error("{path} is missing required columns: {columns}")]
    MissingColumns { path: String, columns: String },
    #[error("Malformed simulation results in {path}: {source}")]
    Malformed { path: String, source: PolarsError },
}

/// Load a simulation results file into a [`DataFrame`].
///
/// Flow identifiers are normalised to strings (they are only a grouping
/// key) and the time and metric columns are strictly cast to `f64`, so a
/// value that does not parse as a number fails the load. The frame is
/// stable-sorted by time, which keeps rows sharing a timestamp in input
/// order.
pub(crate) fn load_flow_stats(path: &Path) -> anyhow::Result<DataFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| DataLoadError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

    let missing: Vec<&str> = required_columns()
        .filter(|&column| frame.column(column).is_err())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns {
            path: path.display().to_string(),
            columns: missing.join(", "),
        }
        .into());
    }

    let mut columns = vec![
        col(FLOW_ID).cast(DataType::String),
        col(TIME).strict_cast(DataType::Float64),
    ];
    columns.extend(
        Metric::ALL
            .iter()
            .map(|metric| col(metric.column()).strict_cast(DataType::Float64)),
    );

    let frame = frame
        .lazy()
        .with_columns(columns)
        .sort([TIME], SortMultipleOptions::default().with_maintain_order(true))
        .collect()
        .map_err(|source| DataLoadError::Malformed {
            path: path.display().to_string(),
            source,
        })?;

    log::debug!("Loaded {} rows from {}", frame.height(), path.display());

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_results(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("simulation_results.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_rows_sorted_by_time() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_results(
            &dir,
            "FlowId,Time,PacketLoss,Throughput,Delay\n\
             1,2.0,4,4.6,0.03\n\
             1,0.0,0,5.0,0.01\n\
             2,1.0,1,3.0,0.05\n",
        );

        let frame = load_flow_stats(&path)?;
        assert_eq!(frame.height(), 3);

        let times: Vec<f64> = frame.column(TIME)?.f64()?.into_iter().flatten().collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn numeric_flow_ids_become_strings() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_results(
            &dir,
            "FlowId,Time,PacketLoss,Throughput,Delay\n\
             7,0.0,0,5.0,0.01\n",
        );

        let frame = load_flow_stats(&path)?;
        assert_eq!(frame.column(FLOW_ID)?.dtype(), &DataType::String);
        Ok(())
    }

    #[test]
    fn rows_with_equal_time_keep_input_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_results(
            &dir,
            "FlowId,Time,PacketLoss,Throughput,Delay\n\
             1,1.0,4,4.6,0.03\n\
             2,0.0,1,3.0,0.05\n\
             1,0.0,0,5.0,0.01\n",
        );

        let frame = load_flow_stats(&path)?;
        let throughputs: Vec<f64> = frame
            .column("Throughput")?
            .f64()?
            .into_iter()
            .flatten()
            .collect();
        // Both t=0 rows are kept, in input order, ahead of the t=1 row.
        assert_eq!(throughputs, vec![3.0, 5.0, 4.6]);
        Ok(())
    }

    #[test]
    fn extra_columns_are_tolerated() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_results(
            &dir,
            "FlowId,Time,PacketLoss,Throughput,Delay,Jitter\n\
             1,0.0,0,5.0,0.01,0.002\n",
        );

        let frame = load_flow_stats(&path)?;
        assert_eq!(frame.height(), 1);
        assert!(frame.column("Jitter").is_ok());
        Ok(())
    }

    #[test]
    fn missing_columns_are_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_results(
            &dir,
            "FlowId,Time,PacketLoss\n\
             1,0.0,0\n",
        );

        let err = load_flow_stats(&path).unwrap_err();
        match err.downcast_ref::<DataLoadError>() {
            Some(DataLoadError::MissingColumns { columns, .. }) => {
                assert!(columns.contains("Throughput"), "got: {columns}");
                assert!(columns.contains("Delay"), "got: {columns}");
            }
            other => panic!("Expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.csv");

        let err = load_flow_stats(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataLoadError>(),
            Some(DataLoadError::Unreadable { .. })
        ));
    }

    #[test]
    fn non_numeric_metric_values_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_results(
            &dir,
            "FlowId,Time,PacketLoss,Throughput,Delay\n\
             1,0.0,0,fast,0.01\n",
        );

        let err = load_flow_stats(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataLoadError>(),
            Some(DataLoadError::Malformed { .. })
        ));
    }

    #[test]
    fn header_only_input_loads_empty_frame() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_results(&dir, "FlowId,Time,PacketLoss,Throughput,Delay\n");

        let frame = load_flow_stats(&path)?;
        assert_eq!(frame.height(), 0);
        Ok(())
    }
}
