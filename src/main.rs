//! Splicer CLI
//!
//! Compiles queued media edits into staged ffmpeg renders.
//!
//! # Usage
//!
//! ```bash
//! splicer render -i clip.mp4 -e trim=0,30 -e scale=1280:720 -e aspect=16:9
//! splicer plan -i clip.mp4 -e crop-top=40 -e blur=5
//! splicer inspect -i clip.mp4
//! splicer concat --inputs a.mp4 b.mp4 -o joined.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use splicer_cli::app::DefaultAppContainer;
use splicer_cli::cli::{commands, Cli, Commands};
use splicer_cli::config_initialization::initialize_configuration;
use splicer_cli::utils::logging::LoggingSystem;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    LoggingSystem::new(config.logging.clone()).initialize()?;
    debug!(?config, "Configuration loaded");

    let container = DefaultAppContainer::new(&config);

    match cli.command {
        Commands::Render(args) => commands::render(&container, args).await,
        Commands::Plan(args) => commands::plan(&container, args).await,
        Commands::Inspect(args) => commands::inspect(&container, args).await,
        Commands::Concat(args) => commands::concat(&container, args).await,
    }
}
