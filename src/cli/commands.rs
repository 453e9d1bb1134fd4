//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Infer a flattened, annotated schema from the `message` field of a JSON
/// document
#[derive(Parser, Debug)]
#[command(name = "message-schema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source JSON document
    #[arg(value_name = "path_to_file")]
    pub path: PathBuf,

    /// Configuration file (YAML)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Project base directory (overrides the config file)
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// Write the schema here instead of `<base_dir>/schema/schema_<stem>.json`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the inference output without rewriting it
    #[arg(long)]
    pub raw: bool,

    /// Let properties overwrite colliding descriptor keys instead of failing
    #[arg(long)]
    pub overwrite_collisions: bool,

    /// Detect string formats (date-time, uri, ...)
    #[arg(long)]
    pub infer_formats: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
