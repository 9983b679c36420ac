mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use axiswap_core::pipeline::{self, PipelineConfig};

/// Exit status for a malformed command line.
const USAGE_EXIT_CODE: i32 = 1;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(USAGE_EXIT_CODE);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    info!(input = ?cli.input, output = ?cli.output, threads = ?cli.threads, "starting axis swap");

    let config = PipelineConfig {
        threads: cli.threads,
        output: cli.output,
        preview_dir: cli.preview_dir,
    };

    let summary = pipeline::run_pipeline(&cli.input, &config, |stage| println!("{stage}"))
        .with_context(|| format!("failed to transform {}", cli.input.display()))?;

    info!(
        output = ?summary.output,
        frames = summary.output_frames,
        width = summary.output_width,
        height = summary.output_height,
        "axis swap complete"
    );
    Ok(())
}
