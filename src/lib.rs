//! Plexbot Library
//!
//! Parses downloaded TV episode filenames and relocates them into the Plex library layout,
//! running operator-configured hook commands around each move.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
