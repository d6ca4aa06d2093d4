// src/commands/cpan_version.rs

//! CPAN version conversion command

use anyhow::Result;
use portup::frontend::cpan::standardize_cpan_version;

pub fn cmd_cpan_version(versions: &[String]) -> Result<()> {
    for version in versions {
        println!("{} -> {}", version, standardize_cpan_version(version));
    }
    Ok(())
}
