//! Command-line interface for the Macabre API server.

use clap::{Parser, Subcommand};

/// Macabre — backend API for the horror-fiction publishing site
#[derive(Parser)]
#[command(name = "macabre")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (the default)
    #[command(alias = "-s", alias = "--serve")]
    Serve,

    /// Create a default config file
    #[command(alias = "--init")]
    Init,
}
