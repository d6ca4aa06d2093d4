// src/commands/current_version.rs

//! Query the version of a port in the MacPorts tree

use anyhow::{Context, Result};
use portup::{Config, Frontend};

pub fn cmd_current_version(frontend: &str, name: &str, config: &Config) -> Result<()> {
    let frontend: Frontend = frontend.parse()?;

    let version = portup::ports::current_version(&config.port_command, frontend, name)
        .with_context(|| format!("Failed to query the MacPorts tree for {}", name))?;

    match version {
        Some(version) => println!("{} {}", frontend.port_folder(name), version),
        None => println!("{} is not in the MacPorts tree", frontend.port_folder(name)),
    }
    Ok(())
}
