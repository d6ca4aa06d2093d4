// src/cli.rs

//! CLI definitions for portup
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portup")]
#[command(author = "portup Contributors")]
#[command(version)]
#[command(about = "Update MacPorts Portfiles to new upstream releases with minimal diffs", long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config dir>/portup/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite a Portfile for a new upstream release
    Update {
        /// Package diff describing the old and new release (TOML or JSON)
        #[arg(short, long)]
        diff: PathBuf,

        /// Upstream frontend: pypi, cpan or rubygems (overrides the diff file)
        #[arg(short, long)]
        frontend: Option<String>,

        /// Root of the ports tree
        #[arg(long)]
        ports_dir: Option<PathBuf>,

        /// Portfile to rewrite (default: <ports-dir>/<category>/<port>/Portfile)
        #[arg(short, long)]
        portfile: Option<PathBuf>,

        /// Print a unified diff instead of writing the Portfile
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the version of a port currently in the MacPorts tree
    CurrentVersion {
        /// Upstream frontend: pypi, cpan or rubygems
        frontend: String,

        /// Upstream package name
        name: String,
    },

    /// Convert CPAN versions to MacPorts dotted-decimal form
    CpanVersion {
        /// Versions to convert
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
