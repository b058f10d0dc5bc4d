//! Command-line argument parsing
//!
//! The binary is a headless front end over the buffer engine: it loads a
//! file, lexes it, and prints either a highlighted dump or a token
//! summary.

use clap::Parser;
use std::path::PathBuf;

/// A text buffer engine with incremental syntax highlighting
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "A text buffer engine with incremental syntax highlighting")]
pub struct CliArgs {
    /// File to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Force a language instead of detecting from the file extension
    /// (e.g., "rust", "python")
    #[arg(short, long, value_name = "NAME")]
    pub language: Option<String>,

    /// Print a per-kind token count summary instead of highlighted text
    #[arg(short, long)]
    pub summary: bool,

    /// Disable ANSI colors in the highlighted dump
    #[arg(long)]
    pub no_color: bool,
}
