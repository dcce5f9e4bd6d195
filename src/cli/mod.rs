//! CLI module for tokengate
//!
//! Provides subcommands for running the service:
//! - `serve`: HTTP API server (default)

pub mod serve;

use clap::{Parser, Subcommand};

/// tokengate - login and bearer token issuance service
#[derive(Parser)]
#[command(name = "tokengate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
