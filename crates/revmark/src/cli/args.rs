//! Command-line argument structures and enums

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "revmark")]
#[command(version)]
#[command(about = "Turn an original and an edited manuscript into a tracked-changes .docx", long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a .docx with tracked changes
    #[command(alias = "g")]
    Generate {
        /// Path to the original text (UTF-8)
        original: PathBuf,

        /// Path to the edited text (UTF-8)
        edited: PathBuf,

        /// Output file (default: config's default_file_name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name to use when --output is not given
        #[arg(short, long)]
        name: Option<String>,

        /// Author shown on every tracked change
        #[arg(short, long)]
        author: Option<String>,

        /// Largest LCS table before falling back to anchor alignment
        #[arg(long)]
        max_lcs_cells: Option<usize>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show what changed without writing a document
    #[command(alias = "s")]
    Summary {
        /// Path to the original text (UTF-8)
        original: PathBuf,

        /// Path to the edited text (UTF-8)
        edited: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Classify each change against the built-in style rules
        #[arg(short, long)]
        rules: bool,
    },

    /// List the built-in style rules
    Rules,

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_with_global_config() {
        let cli = Cli::parse_from([
            "revmark", "g", "old.txt", "new.txt", "--author", "Copy Desk", "-c", "alt.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        match cli.command {
            Commands::Generate {
                original,
                author,
                force,
                ..
            } => {
                assert_eq!(original, PathBuf::from("old.txt"));
                assert_eq!(author.as_deref(), Some("Copy Desk"));
                assert!(!force);
            }
            _ => panic!("expected generate"),
        }
    }
}
