//! CLI parse: clap types for keywatch. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// keywatch - inspect and edit a key-value store through a watch list
#[derive(Parser)]
#[command(name = "keywatch")]
#[command(about = "Watch-list dashboard and JSON API over a persistent key-value store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ and relative store paths resolve here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve the dashboard and JSON API
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },
    /// List watched keys with their current values
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Read one key in real time
    Get {
        key: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add a key to the watch list
    Watch { key: String },
    /// Remove a key from the watch list
    Unwatch { key: String },
    /// Write a value and watch its key
    Set { key: String, value: String },
    /// Delete a key from the store (stays on the watch list)
    Delete { key: String },
    /// Write the default workspace config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
