use anyhow::{Context, Result};
use clap::Parser;
use massrename_core::{should_use_color, Config, OutputFormatter, RenameError, VersionResult};
use std::io::{self, IsTerminal};
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod plan;
mod rename;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet, !cli.no_color);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    };

    let use_color = !cli.no_color && should_use_color(config.defaults.use_color);
    let default_output = OutputFormat::from(config.defaults.output);
    tracing::debug!(use_color, ?default_output, "resolved output settings");

    let result = match cli.command {
        Commands::Plan {
            directory,
            names,
            output,
            preview,
        } => {
            let preview = preview.map_or(config.defaults.preview, Into::into);
            plan::handle_plan(
                &directory,
                &names,
                preview,
                output.unwrap_or(default_output),
                use_color,
                cli.quiet,
            )
            .map(|()| false)
        },

        Commands::Rename {
            directory,
            names,
            output,
            preview,
            dry_run,
            no_failure_notice,
        } => rename::handle_rename(
            &directory,
            &names,
            preview.into(),
            output.unwrap_or(default_output),
            dry_run,
            config.defaults.failure_notice && !no_failure_notice,
            use_color,
            cli.quiet,
        ),

        Commands::Version { output } => handle_version(output).map(|()| false),
    };

    match result {
        Ok(false) => process::exit(0),
        // Some files could not be renamed; the report already says which
        Ok(true) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// Map an error to the process exit code: 2 for bad input, 3 for anything else
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<RenameError>() {
        Some(e) if e.is_input_error() => 2,
        _ => 3,
    }
}

fn init_tracing(verbose: u8, quiet: bool, allow_color: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(allow_color && io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load ./.massrename.toml"),
    }
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match output {
        OutputFormat::Json => println!("{}", version_result.format_json()),
        OutputFormat::Summary => print!("{}", version_result.format_summary()),
    }
    Ok(())
}
