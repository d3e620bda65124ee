//! Config command handlers

use crate::cli::ConfigInitArgs;
use crate::config::WayfinderConfig;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../wayfinder.example.toml");

/// Handle `wayfinder config init`
///
/// Refuses to overwrite an existing file unless `--force` is given.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    let defaults = WayfinderConfig::default();
    println!("✓ Configuration file created: {}", args.output.display());
    println!(
        "  Export {} (directions, landmarks) and {} (free-text requests) before serving.",
        defaults.maps.api_key_env, defaults.extraction.api_key_env
    );

    Ok(())
}
