//! The `revmark` command-line interface.

/// Clap argument definitions
mod args;

/// Config command handlers
mod config;

/// `revmark generate`
mod generate;

/// `revmark rules`
mod rules;

/// `revmark summary`
mod summary;

/// Shared CLI utilities
mod util;

use clap::Parser;

use args::{Cli, Commands};

/// Main entry point for the CLI
pub fn run_cli() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = util::load_config(cli.config.as_deref());

    // Execute commands and track success
    let success = match cli.command {
        Commands::Generate {
            original,
            edited,
            output,
            name,
            author,
            max_lcs_cells,
            force,
        } => generate::handle_generate(
            &config,
            generate::GenerateArgs {
                original,
                edited,
                output,
                name,
                author,
                max_lcs_cells,
                force,
            },
        ),

        Commands::Summary {
            original,
            edited,
            json,
            rules,
        } => summary::handle_summary(&config, &original, &edited, json, rules),

        Commands::Rules => {
            rules::handle_rules();
            true
        }

        Commands::Config { command } => {
            config::handle_config_command(command, cli.config.as_deref(), &config)
        }
    };

    if !success {
        std::process::exit(1);
    }
}
