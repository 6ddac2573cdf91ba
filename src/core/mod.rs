//! Core business logic modules.

pub mod hooks;
pub mod parser;
pub mod pipeline;
pub mod scanner;
pub mod tokens;
