//! Name and path generators.

pub mod path;
