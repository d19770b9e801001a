//! Config command handlers

use std::path::{Path, PathBuf};

use revmark_core::config::Config;

use crate::cli::args::ConfigCommands;

/// Handle `revmark config`
/// Returns true on success, false on error
pub fn handle_config_command(
    command: Option<ConfigCommands>,
    path_override: Option<&Path>,
    config: &Config,
) -> bool {
    match command {
        None | Some(ConfigCommands::Show) => {
            show_config(config, path_override);
            true
        }
        Some(ConfigCommands::Path) => match config_location(path_override) {
            Some(path) => {
                println!("{}", path.display());
                true
            }
            None => {
                eprintln!("✗ Could not determine a config directory on this system");
                false
            }
        },
        Some(ConfigCommands::Init { force }) => init_config(path_override, force),
    }
}

fn config_location(path_override: Option<&Path>) -> Option<PathBuf> {
    path_override
        .map(Path::to_path_buf)
        .or_else(Config::config_path)
}

/// Show the effective configuration
fn show_config(config: &Config, path_override: Option<&Path>) {
    println!("Revmark Configuration");
    println!("=====================");
    println!("Author: {}", config.author);
    println!("Max LCS cells: {}", config.max_lcs_cells);
    println!("Pairing threshold: {}", config.pairing_threshold);
    println!("Default file name: {}", config.default_file_name);
    println!("Token limit: {}", config.token_limit);

    match config_location(path_override) {
        Some(path) if path.exists() => println!("Config file: {}", path.display()),
        Some(path) => println!("Config file: {} (not created, using defaults)", path.display()),
        None => println!("Config file: none"),
    }
}

/// Write a default config file
fn init_config(path_override: Option<&Path>, force: bool) -> bool {
    let Some(path) = config_location(path_override) else {
        eprintln!("✗ Could not determine a config directory on this system");
        return false;
    };

    if path.exists() && !force {
        eprintln!(
            "✗ Config file '{}' already exists (use --force to overwrite)",
            path.display()
        );
        return false;
    }

    match Config::default().save_to(&path) {
        Ok(()) => {
            println!("✓ Created config file at {}", path.display());
            true
        }
        Err(e) => {
            eprintln!("✗ Error saving config: {}", e);
            false
        }
    }
}
