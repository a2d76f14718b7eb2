use clap::Parser;
use std::path::PathBuf;

/// Smooth a 3D position log into a Lua path table
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Cli {
    /// Line-delimited JSON position log (output is written next to it as .lua)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    trajectory_spline_lib::init_tracing(cli.verbose);

    let summary = trajectory_spline_lib::run(cli.input)?;
    println!(
        "Exported {} of {} points to {}",
        summary.reduced_count,
        summary.smooth_count,
        summary.output_path.display()
    );

    Ok(())
}
