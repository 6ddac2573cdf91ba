//! Defaults command implementation.
//!
//! Prints a starter configuration, e.g. `plexbot defaults > plexbot.toml`.

use crate::models::config::{sample_config, SAMPLE_TOML};
use crate::Result;

/// Render the default configuration.
pub fn render_defaults(json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&sample_config())?)
    } else {
        Ok(SAMPLE_TOML.to_string())
    }
}

/// Print the default configuration to stdout.
pub fn print_defaults(json: bool) -> Result<()> {
    println!("{}", render_defaults(json)?);
    Ok(())
}
