use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rapport-tui")]
#[command(about = "Terminal UI for rapport time reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a real rapport backend
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}
