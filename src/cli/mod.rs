//! CLI module for rosterdex
//!
//! Provides subcommands for running the roster service:
//! - `serve`: run the HTTP API server

pub mod serve;

use clap::{Parser, Subcommand};

/// Rosterdex - species catalog search and team roster API
#[derive(Parser)]
#[command(name = "rosterdex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
