use crate::frame::FLOW_ID;
use polars::prelude::{AnyValue, DataFrame};

/// Partition the [`DataFrame`] into one sub-frame per distinct flow
/// identifier.
///
/// Values in the flow identifier column MUST be in String format; the
/// loader normalises them.
///
/// Returns the sub-frames keyed by flow identifier, in the order each flow
/// first appears in the frame. Row order within each sub-frame is
/// preserved, so a frame sorted by time yields time-ordered series. The
/// partitioning is a single pass over the frame; the result is consumed
/// once per metric.
pub(crate) fn partition_by_flow(frame: DataFrame) -> anyhow::Result<Vec<(String, DataFrame)>> {
    if frame.height() == 0 {
        return Ok(Vec::new());
    }

    let mut partitions = Vec::new();
    for part in frame.partition_by_stable([FLOW_ID], true)? {
        let flow_id = match part.column(FLOW_ID)?.get(0) {
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(AnyValue::StringOwned(s)) => s.into_string(),
            Ok(v) => {
                anyhow::bail!("In flow identifier column, found non String value: {v:?}");
            }
            Err(e) => return Err(e.into()),
        };

        log::debug!("Partition for {FLOW_ID}={flow_id} has {} rows", part.height());
        partitions.push((flow_id, part));
    }

    Ok(partitions)
}
