mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "strike", about = "Lightning strike detection in video")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a whole video and list frames with lightning strikes
    Detect(commands::detect::DetectArgs),
    /// Report strikes frame by frame as they are confirmed
    Stream(commands::stream::StreamArgs),
    /// Show source dimensions and frame count
    Info(commands::info::InfoArgs),
    /// Print or save the default detection config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Detect(args) => commands::detect::run(args),
        Commands::Stream(args) => commands::stream::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
