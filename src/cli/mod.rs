//! CLI module
//!
//! Command-line interface: `message-schema <path_to_file>` infers the
//! message schema of a JSON file and writes it under the schema directory.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
