use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use strike_core::io::{open_source, source_info};

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file or image-sequence directory
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = open_source(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let info = source_info(&args.file, source.as_ref());

    println!("Source:      {}", info.path.display());
    println!("Type:        {}", info.kind);
    match info.total_frames {
        Some(total) => println!("Frames:      {}", total),
        None => println!("Frames:      unknown"),
    }
    println!("Dimensions:  {}x{}", info.width, info.height);

    let frame_mb = (info.width as f64 * info.height as f64 * 4.0) / (1024.0 * 1024.0);
    println!("RGBA frame:  {:.2} MB", frame_mb);

    Ok(())
}
