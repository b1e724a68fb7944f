use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename the files of a folder, in natural order, from an ordered list of names
#[derive(Parser, Debug)]
#[command(name = "massrename")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output (any non-empty NO_COLOR other than "0"/"false" counts)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors and machine output
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Read defaults from this file instead of ./.massrename.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which file would get which name, without renaming anything
    Plan {
        /// Folder whose files are renamed
        directory: PathBuf,

        /// Names file: one name per line, a .json array, a workbook (.xlsx, .ods, ...) or - for stdin
        #[arg(long, value_name = "PATH|-")]
        names: PathBuf,

        /// Output format for machine consumption
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,

        /// Preview format (defaults to the config file, then table)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,
    },

    /// Rename the files of a folder from the list of names
    Rename {
        /// Folder whose files are renamed
        directory: PathBuf,

        /// Names file: one name per line, a .json array, a workbook (.xlsx, .ods, ...) or - for stdin
        #[arg(long, value_name = "PATH|-")]
        names: PathBuf,

        /// Output format for machine consumption
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,

        /// Show the plan before renaming
        #[arg(long, value_enum, default_value = "none")]
        preview: PreviewArg,

        /// Report what would be renamed without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Do not print the first rename failure as it happens
        #[arg(long)]
        no_failure_notice: bool,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
