use std::fmt;
use std::path::PathBuf;

/// The three per-flow measurements carried by a simulation results file.
///
/// Charts are generated in the order the variants are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    PacketLoss,
    Throughput,
    Delay,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::PacketLoss, Metric::Throughput, Metric::Delay];

    /// Name of the results file column holding this metric's values.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::PacketLoss => "PacketLoss",
            Metric::Throughput => "Throughput",
            Metric::Delay => "Delay",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::PacketLoss => "Packet Loss vs. Time for Each Flow ID",
            Metric::Throughput => "Throughput vs. Time for Each Flow ID",
            Metric::Delay => "Delay vs. Time for Each Flow ID",
        }
    }

    /// Y-axis label.
    ///
    /// The delay column carries no unit in the results file, so its label
    /// claims none.
    pub fn y_label(&self) -> &'static str {
        match self {
            Metric::PacketLoss => "Packet Loss (packets)",
            Metric::Throughput => "Throughput (Mbps)",
            Metric::Delay => "Delay",
        }
    }

    /// Fixed name of the image file this metric's chart is written to.
    pub fn file_name(&self) -> &'static str {
        match self {
            Metric::PacketLoss => "packet_loss_vs_time.png",
            Metric::Throughput => "throughput_vs_time.png",
            Metric::Delay => "delay_vs_time.png",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Record of one chart written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOutput {
    pub metric: Metric,
    pub path: PathBuf,
    /// Number of line series drawn, one per flow.
    pub series: usize,
    /// Total number of points plotted across all series.
    pub points: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_order_matches_file_names() {
        let file_names: Vec<_> = Metric::ALL.iter().map(|m| m.file_name()).collect();
        assert_eq!(
            file_names,
            vec![
                "packet_loss_vs_time.png",
                "throughput_vs_time.png",
                "delay_vs_time.png"
            ]
        );
    }

    #[test]
    fn metric_columns_are_distinct() {
        let columns: std::collections::HashSet<_> =
            Metric::ALL.iter().map(|m| m.column()).collect();
        assert_eq!(columns.len(), Metric::ALL.len());
    }
}
