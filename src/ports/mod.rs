// src/ports/mod.rs

//! Access to a MacPorts ports tree
//!
//! This module locates Portfiles inside a ports tree, asks the `port`
//! command which version of a port is currently published, and writes
//! rewritten Portfiles back to disk.

use crate::error::{Error, Result};
use crate::frontend::Frontend;
use crate::package::PackageDiff;
use crate::portfile::{PortfileRewriter, RewriteReport};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Location of a port's Portfile: `<ports_dir>/<category>/<folder>/Portfile`
pub fn portfile_path(ports_dir: &Path, frontend: Frontend, name: &str) -> PathBuf {
    ports_dir
        .join(frontend.category())
        .join(frontend.port_folder(name))
        .join("Portfile")
}

/// Interpret the output of `port info --version <port>`
///
/// Returns `Ok(None)` when the port is not in the tree.
pub fn parse_port_info(output: &str) -> Result<Option<String>> {
    let output = output.trim();

    if output.starts_with("Error") {
        return Ok(None);
    }

    if output.starts_with("version") {
        return Ok(output.split_whitespace().nth(1).map(str::to_string));
    }

    if output.starts_with("Warning") {
        warn!(
            "port definitions are more than two weeks old, \
             consider updating them by running 'port selfupdate'."
        );
        return Ok(output
            .split_once("version: ")
            .and_then(|(_, rest)| rest.split_whitespace().next())
            .map(str::to_string));
    }

    Err(Error::PortCommand(format!(
        "unexpected output: {}. Please make sure MacPorts is installed and your PATH is set up correctly",
        output
    )))
}

/// Ask the ports tree for the current version of a port
pub fn current_version(port_command: &str, frontend: Frontend, name: &str) -> Result<Option<String>> {
    let port_name = frontend.port_folder(name);
    info!("Checking MacPorts tree for port {}", port_name);

    let port = which::which(port_command).map_err(|e| {
        Error::PortCommand(format!("{} not found in PATH: {}", port_command, e))
    })?;
    debug!("Using {}", port.display());

    let output = Command::new(&port)
        .args(["info", "--version", &port_name])
        .output()
        .map_err(|e| Error::PortCommand(format!("Failed to run {}: {}", port.display(), e)))?;

    // `port` reports missing ports on stderr; look at both streams.
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    let version = parse_port_info(&text)?;
    match &version {
        Some(v) => info!("Current MacPorts version for {} is {}", port_name, v),
        None => info!("{} not found in MacPorts tree", port_name),
    }
    Ok(version)
}

/// Compute the rewritten Portfile without touching the file
pub fn preview_portfile(
    path: &Path,
    diff: &PackageDiff,
    frontend: Frontend,
) -> Result<(String, String, RewriteReport)> {
    let original = std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!("Failed to read Portfile {}: {}", path.display(), e))
    })?;

    let (updated, report) = PortfileRewriter::new(diff, &frontend)
        .archive_format(frontend.archive_format())
        .rewrite_with_report(&original);

    Ok((original, updated, report))
}

/// Rewrite a Portfile in place
///
/// The new content is written to a temporary file next to the Portfile and
/// renamed over it, so a failure never leaves a half-written Portfile.
pub fn update_portfile(path: &Path, diff: &PackageDiff, frontend: Frontend) -> Result<RewriteReport> {
    info!("Updating {}", path.display());
    let (original, updated, report) = preview_portfile(path, diff, frontend)?;

    if updated == original {
        info!("{} is already up to date", path.display());
        return Ok(report);
    }

    write_atomically(path, &updated)?;
    info!(
        "Updated {} ({} lines rewritten, {} dependency blocks regenerated)",
        path.display(),
        report.lines_changed,
        report.regenerated.len()
    );
    Ok(report)
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| Error::IoError(format!("Failed to create temp file in {}: {}", dir.display(), e)))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| Error::IoError(format!("Failed to write temp file: {}", e)))?;

    // Keep the permissions of the file being replaced.
    if let Ok(metadata) = std::fs::metadata(path) {
        if let Err(e) = std::fs::set_permissions(temp.path(), metadata.permissions()) {
            warn!(
                "Failed to copy permissions of {} to the rewritten file: {}",
                path.display(),
                e
            );
        }
    }

    temp.persist(path)
        .map_err(|e| Error::IoError(format!("Failed to replace {}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Package;

    #[test]
    fn test_portfile_path() {
        let path = portfile_path(Path::new("/ports"), Frontend::Cpan, "Foo::Bar");
        assert_eq!(path, PathBuf::from("/ports/perl/p5-foo-bar/Portfile"));

        let path = portfile_path(Path::new("."), Frontend::Pypi, "Django");
        assert_eq!(path, PathBuf::from("./python/py-django/Portfile"));
    }

    #[test]
    fn test_port_found() {
        assert_eq!(
            parse_port_info("version: 0.123").unwrap(),
            Some("0.123".to_string())
        );
    }

    #[test]
    fn test_port_not_found() {
        assert_eq!(parse_port_info("Error: fake-error").unwrap(), None);
    }

    #[test]
    fn test_port_outdated() {
        assert_eq!(
            parse_port_info("Warning: fake-warning \nversion: 0.123").unwrap(),
            Some("0.123".to_string())
        );
    }

    #[test]
    fn test_port_error() {
        let err = parse_port_info("bash: port: command not found").unwrap_err();
        assert!(matches!(err, Error::PortCommand(_)));
    }

    #[test]
    fn test_update_portfile_writes_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Portfile");
        std::fs::write(&path, "version 1.0\nrevision 2\n").unwrap();

        let diff = PackageDiff::new(Package::new("foo", "1.0"), Package::new("foo", "1.1"));
        let report = update_portfile(&path, &diff, Frontend::Pypi).unwrap();

        assert_eq!(report.lines_changed, 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "version 1.1\nrevision 0\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_update_portfile_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Portfile");
        std::fs::write(&path, "version 1.0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        let diff = PackageDiff::new(Package::new("foo", "1.0"), Package::new("foo", "1.1"));
        update_portfile(&path, &diff, Frontend::Pypi).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "version 1.1\n");
    }

    #[test]
    fn test_update_portfile_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let diff = PackageDiff::new(Package::new("foo", "1.0"), Package::new("foo", "1.1"));
        let err = update_portfile(&dir.path().join("Portfile"), &diff, Frontend::Pypi).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
