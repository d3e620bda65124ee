//! CLI module for Wayfinder
//!
//! # Commands
//!
//! - `serve` - Start the directions API server
//! - `directions` - Run the pipeline once and print the result
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! wayfinder serve
//!
//! # One-shot directions without landmark lookups
//! wayfinder directions --from "Union Station" --to "Pike Place Market" --no-landmarks
//!
//! # Generate shell completions
//! wayfinder completions bash > ~/.bash_completion.d/wayfinder
//! ```

pub mod completions;
pub mod config;
pub mod directions;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use directions::handle_directions;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wayfinder - landmark-aware directions for audio playback
#[derive(Parser, Debug)]
#[command(
    name = "wayfinder",
    version,
    about = "Turn-by-turn directions enriched with landmarks and narrated for speech"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the directions API server
    Serve(ServeArgs),
    /// Fetch and enrich directions once
    Directions(DirectionsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "wayfinder.toml")]
    pub config: PathBuf,

    /// Override server port (WAYFINDER_PORT is read with the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "WAYFINDER_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WAYFINDER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable landmark lookups
    #[arg(long)]
    pub no_landmarks: bool,

    /// Disable the transcript and directions store
    #[arg(long)]
    pub no_store: bool,
}

#[derive(Args, Debug)]
pub struct DirectionsArgs {
    /// Starting point; defaults to "current location"
    #[arg(short, long)]
    pub from: Option<String>,

    /// Destination
    #[arg(short, long)]
    pub to: String,

    /// Travel mode (driving, walking, bicycling, transit)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Skip landmark lookups
    #[arg(long)]
    pub no_landmarks: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "wayfinder.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "wayfinder.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
