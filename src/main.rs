//! Plexbot CLI
//!
//! Moves downloaded TV episodes into the Plex naming format.

use clap::Parser;
use plexbot::cli::{
    args::{Cli, Commands},
    commands::{defaults, move_files},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match cli.command {
        Commands::Move { source } => {
            move_files::move_files(&source, cli.config.as_deref(), cli.hash.as_deref()).await?;
        }

        Commands::Defaults { json } => {
            defaults::print_defaults(json)?;
        }

        Commands::Version => {
            println!("plexbot {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("plexbot=debug")
    } else {
        EnvFilter::new("plexbot=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
