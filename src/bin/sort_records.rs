use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Dedupe and sort a JSON-lines log by IGT, in place
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Cli {
    /// Log file to rewrite
    #[arg(value_hint = clap::ValueHint::FilePath)]
    file: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    trajectory_spline_lib::init_tracing(cli.verbose);

    let count = trajectory_spline_lib::commands::sort_records_file(&cli.file)
        .with_context(|| format!("failed to sort {}", cli.file.display()))?;
    tracing::debug!("{} records kept", count);

    Ok(())
}
