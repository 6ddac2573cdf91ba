//! CLI command implementations.

pub mod defaults;
pub mod move_files;
