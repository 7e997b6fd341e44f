pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mappings")]
#[command(author, version, about = "Inspect and rewrite jadx mapping files", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a mapping file and report what it contains
    Check {
        /// Mapping file to read
        file: PathBuf,
    },

    /// Read a mapping file and write it back in canonical order
    Rewrite {
        /// Mapping file to read
        input: PathBuf,

        /// Destination file (replaced if it exists)
        output: PathBuf,
    },

    /// Print the renamed form of one identity
    Translate {
        /// Mapping file to read
        file: PathBuf,

        /// Record to translate (e.g. "c a.Foo", "m a.Foo.run(I)V")
        record: String,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Check { file } => commands::check::run(&file, cli.format),
        Commands::Rewrite { input, output } => commands::rewrite::run(&input, &output, cli.format),
        Commands::Translate { file, record } => {
            commands::translate::run(&file, &record, cli.format)
        }
    }
}
