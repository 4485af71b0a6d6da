//! Command-line interface for chatrelay
//!
//! Configuration is environment-sourced; the CLI provides a small set of
//! overrides for local runs.

use clap::Parser;

/// Minimal HTTP relay for LLM chat completions
#[derive(Parser, Debug)]
#[command(name = "chatrelay")]
#[command(version)]
#[command(about = "Minimal HTTP relay for LLM chat completions")]
pub struct Cli {
    /// Listening port (overrides the PORT environment variable)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address (overrides the HOST environment variable)
    #[arg(long)]
    pub host: Option<String>,

    /// Path to a dotenv file to load before reading configuration
    #[arg(long)]
    pub env_file: Option<String>,
}
