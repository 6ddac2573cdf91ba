//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plexbot - Organize downloaded TV episodes into the Plex naming format
#[derive(Parser, Debug)]
#[command(name = "plexbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: plexbot.toml in the current or home directory)
    #[arg(long, global = true, env = "PLEXBOT_CONFIG", value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Torrent hash used to identify the download, available as {hash}
    #[arg(long, global = true, env = "PLEXBOT_HASH", value_name = "HASH")]
    pub hash: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move and rename files in a directory into the Plex TV library
    ///
    /// Source directory contains: 'Once.Upon.a.Time.S03E01.720p.HDTV.X264-DIMENSION.mkv'
    /// Plex base TV directory: '/media/tv'
    ///
    /// The file is copied to: /media/tv/Once Upon A Time/Season 3/s3e01.mkv
    Move {
        /// Directory to move files from
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
    },

    /// Print a default configuration file
    Defaults {
        /// Print JSON instead of TOML
        #[arg(short, long)]
        json: bool,
    },

    /// Print the version
    Version,
}
