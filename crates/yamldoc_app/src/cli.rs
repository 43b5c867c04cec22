//! Options owned by the binary. Everything after them is handed to the
//! `--yamldoc-*` flag parser untouched.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogDestination;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "yamldoc", version, about = "Render YAML documents into static HTML pages")]
pub struct Cli {
    /// Directory the output folder is created in.
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Directory include/exclude patterns resolve against (default: cwd).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Converter command; reads a document on stdin and prints a JSON
    /// object with html, title, description and meta.
    #[arg(long)]
    pub backend: Option<String>,

    /// Where log lines go.
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// `--yamldoc-<key> [value]` and `--no-yamldoc-<key>` overrides.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "YAMLDOC_FLAGS")]
    pub passthrough: Vec<String>,
}
