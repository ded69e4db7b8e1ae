//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Black-box security test harness for authentication gateways
#[derive(Parser, Debug)]
#[command(name = "gateway-probe")]
#[command(version = "0.1.0")]
#[command(about = "Probe an authentication gateway for injection, bypass, and abuse weaknesses")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run probe scenarios against the gateway
    Scan(ScanArgs),

    /// List available scenarios
    List(ListArgs),

    /// Show recognized environment variables
    Env,
}

/// Arguments for scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Gateway base URL (overrides GATEWAY_BASE_URL)
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Specific scenario number to run (1-24)
    #[arg(short, long)]
    pub scenario: Option<u8>,

    /// Run one category (injection, unauthorized, oauth, jwt, abuse)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Skip specific scenarios (comma-separated numbers)
    #[arg(long)]
    pub skip: Option<String>,

    /// Directory with attack payload fixture files
    #[arg(short, long)]
    pub data_dir: Option<String>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Request timeout in seconds (default 10)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Save the report to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show detailed scenario information
    #[arg(short, long)]
    pub detailed: bool,
}

impl ScanArgs {
    /// Parse the skip list into scenario numbers
    pub fn skip_numbers(&self) -> Vec<u8> {
        self.skip
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}
