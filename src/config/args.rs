//! Command-line argument parsing

use clap::{Parser, Subcommand};

/// What is my IP, and where am I
#[derive(Debug, Parser)]
#[command(name = "ipwhere", version, about)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Write a sample configuration file (stdout when no path is given)
    GenerateConfig {
        /// Destination file
        output: Option<String>,
    },
}
