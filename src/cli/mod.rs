//! CLI module - Command-line interface for the enquiry service
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// L&D backend - enquiry intake and site content API
#[derive(Parser)]
#[command(name = "ld-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Check storage configuration and connectivity
    Check,

    /// Print the most recent enquiries
    #[command(alias = "ls")]
    Enquiries {
        /// Number of enquiries to show
        #[arg(short, long, default_value = "10")]
        limit: u64,
    },
}

pub use commands::*;
