//! Command-line interface

use clap::{Parser, Subcommand};

pub mod serve;

#[derive(Debug, Parser)]
#[command(name = "registration-api", about = "User registration REST API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
