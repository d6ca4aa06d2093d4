// src/commands/update.rs

//! Portfile update command

use anyhow::{anyhow, Context, Result};
use portup::ports::{portfile_path, preview_portfile, update_portfile};
use portup::{Config, DiffFile, Frontend};
use std::path::PathBuf;
use tracing::{info, warn};

/// Options of `portup update`
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub diff: PathBuf,
    pub frontend: Option<String>,
    pub ports_dir: Option<PathBuf>,
    pub portfile: Option<PathBuf>,
    pub dry_run: bool,
}

/// Rewrite a Portfile for the release described by a diff file
pub fn cmd_update(options: UpdateOptions, config: &Config) -> Result<()> {
    let (diff_frontend, mut diff) = DiffFile::load(&options.diff)
        .with_context(|| format!("Failed to load diff file: {}", options.diff.display()))?
        .into_parts();

    // CLI flag, then the diff file, then the configuration
    let frontend = match options.frontend.or(diff_frontend) {
        Some(name) => name.parse::<Frontend>()?,
        None => config.default_frontend().ok_or_else(|| {
            anyhow!("No frontend given: pass --frontend, set it in the diff file or in the configuration")
        })?,
    };

    if frontend == Frontend::Cpan {
        diff.normalize_specifiers(|spec| frontend.normalize_specifier(spec));
    }

    let portfile = match options.portfile {
        Some(path) => path,
        None => {
            let ports_dir = options.ports_dir.unwrap_or_else(|| config.ports_dir.clone());
            portfile_path(&ports_dir, frontend, &diff.new.name)
        }
    };

    info!(
        "Updating {} from {} to {}",
        frontend.port_name(&diff.new.name),
        diff.old_version(),
        diff.new_version()
    );

    if options.dry_run {
        let (original, updated, report) = preview_portfile(&portfile, &diff, frontend)
            .with_context(|| format!("Failed to rewrite {}", portfile.display()))?;
        if original == updated {
            println!("{} is already up to date", portfile.display());
        } else {
            print!("{}", diffy::create_patch(&original, &updated));
        }
        if report.appended {
            warn!("New dependency blocks were appended at the end of the Portfile; move them into place");
        }
        return Ok(());
    }

    let report = update_portfile(&portfile, &diff, frontend)
        .with_context(|| format!("Failed to update {}", portfile.display()))?;

    println!("Updated: {}", portfile.display());
    println!("  Lines rewritten: {}", report.lines_changed);
    if !report.regenerated.is_empty() {
        let phases: Vec<String> = report.regenerated.iter().map(|p| p.to_string()).collect();
        println!("  Dependency blocks regenerated: {}", phases.join(", "));
    }
    if report.appended {
        println!("  New dependency blocks appended after '#TODO: Move this' - review before committing");
    }

    Ok(())
}
