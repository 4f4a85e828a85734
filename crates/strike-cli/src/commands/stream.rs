use anyhow::{Context, Result};
use clap::Args;
use console::Style;
use strike_core::io::open_source;
use strike_core::pipeline::run_stream;

use super::options::DetectionArgs;

#[derive(Args)]
pub struct StreamArgs {
    #[command(flatten)]
    pub options: DetectionArgs,
}

pub fn run(args: &StreamArgs) -> Result<()> {
    let config = args.options.build_config()?;
    let mut source = open_source(&config.input)
        .with_context(|| format!("Failed to open {}", config.input.display()))?;

    let strike = Style::new().yellow().bold();
    let summary = run_stream(&config, &mut source, |index| {
        println!("{} frame {index}", strike.apply_to("strike"));
    })?;

    eprintln!(
        "{} frames processed, {} strikes reported",
        summary.frames_processed, summary.detections_reported
    );
    Ok(())
}
