use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use strike_core::io::open_source;
use strike_core::pipeline::run_batch;

use super::options::DetectionArgs;
use crate::progress::BarReporter;
use crate::summary::{print_config_summary, print_detection_report};

#[derive(Args)]
pub struct DetectArgs {
    #[command(flatten)]
    pub options: DetectionArgs,

    /// Only print the detected frame indices, one per line
    #[arg(long)]
    pub quiet: bool,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = args.options.build_config()?;
    let mut source = open_source(&config.input)
        .with_context(|| format!("Failed to open {}", config.input.display()))?;

    if !args.quiet {
        print_config_summary(&config, source.kind());
    }

    let reporter = Arc::new(BarReporter::new(args.quiet)?);
    let report = run_batch(&config, &mut source, reporter.clone())?;
    reporter.clear();

    if args.quiet {
        for index in &report.detected {
            println!("{index}");
        }
    } else {
        print_detection_report(&report);
    }
    Ok(())
}
