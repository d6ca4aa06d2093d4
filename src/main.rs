// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use portup::Config;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Update {
            diff,
            frontend,
            ports_dir,
            portfile,
            dry_run,
        } => {
            let config = Config::discover(cli.config.as_deref())?;
            commands::cmd_update(
                commands::UpdateOptions {
                    diff,
                    frontend,
                    ports_dir,
                    portfile,
                    dry_run,
                },
                &config,
            )
        }
        Commands::CurrentVersion { frontend, name } => {
            let config = Config::discover(cli.config.as_deref())?;
            commands::cmd_current_version(&frontend, &name, &config)
        }
        Commands::CpanVersion { versions } => commands::cmd_cpan_version(&versions),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "portup", &mut std::io::stdout());
            Ok(())
        }
    }
}
