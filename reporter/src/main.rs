use clap::Parser;
use flow_reporter::cli::FlowReporterCli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = FlowReporterCli::parse();

    let outputs = flow_reporter::generate_reports(&cli.input, &cli.output_dir)?;
    log::info!("Report complete, {} charts written", outputs.len());

    Ok(())
}
