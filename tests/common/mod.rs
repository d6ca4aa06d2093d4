// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use portup::{Archive, Frontend, Package, PackageDiff, Phase, Requirement};
use std::path::{Path, PathBuf};

/// Build a requirement list from names
pub fn reqs(names: &[&str]) -> Vec<Requirement> {
    names.iter().map(|n| Requirement::new(*n)).collect()
}

/// Build a package with the given requirements per phase
pub fn package(name: &str, version: &str, requirements: &[(Phase, &[&str])]) -> Package {
    let mut pkg = Package::new(name, version);
    for (phase, names) in requirements {
        pkg.set_requirements(*phase, reqs(names));
    }
    pkg
}

/// Source tarball with an rmd160 digest and a size
pub fn tarball(rmd160: &str, size: u64) -> Archive {
    Archive::new("https://files.example.org/archive.tar.gz")
        .with_size(size)
        .with_checksum("rmd160", rmd160)
}

/// A diff where nothing but the version changes
pub fn version_bump(name: &str, old: &str, new: &str) -> PackageDiff {
    PackageDiff::new(Package::new(name, old), Package::new(name, new))
}

/// Write a Portfile at its canonical place in a ports tree
///
/// Returns the Portfile path.
pub fn write_portfile(ports_dir: &Path, frontend: Frontend, name: &str, content: &str) -> PathBuf {
    let path = portup::ports::portfile_path(ports_dir, frontend, name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}
