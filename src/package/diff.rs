// src/package/diff.rs

//! Structural diff between two releases of a package.

use super::{Package, Phase, Requirement};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// An old/new pair of package descriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDiff {
    pub old: Package,
    pub new: Package,
}

impl PackageDiff {
    pub fn new(old: Package, new: Package) -> Self {
        Self { old, new }
    }

    pub fn old_version(&self) -> &str {
        &self.old.version
    }

    pub fn new_version(&self) -> &str {
        &self.new.version
    }

    /// Requirements of `phase` present in the old release but not in the new one
    ///
    /// Matching is by name; the old release's order is kept.
    pub fn deleted_requirements(&self, phase: Phase) -> Vec<&Requirement> {
        missing_from(self.old.requirements(phase), self.new.requirements(phase))
    }

    /// Requirements of `phase` present in the new release but not in the old one
    ///
    /// Matching is by name; the new release's order is kept.
    pub fn new_requirements(&self, phase: Phase) -> Vec<&Requirement> {
        missing_from(self.new.requirements(phase), self.old.requirements(phase))
    }

    /// Rewrite every requirement specifier on both sides
    pub fn normalize_specifiers<F>(&mut self, normalize: F)
    where
        F: Fn(&str) -> String,
    {
        for pkg in [&mut self.old, &mut self.new] {
            for req in pkg.requirements.values_mut().flatten() {
                if let Some(spec) = req.specifier.as_mut() {
                    *spec = normalize(spec);
                }
            }
        }
    }
}

fn missing_from<'a>(from: &'a [Requirement], other: &[Requirement]) -> Vec<&'a Requirement> {
    let names: HashSet<&str> = other.iter().map(|r| r.name.as_str()).collect();
    from.iter()
        .filter(|r| !names.contains(r.name.as_str()))
        .collect()
}

/// On-disk description of an update: the frontend plus both releases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffFile {
    /// Upstream index the package comes from (`pypi`, `cpan`, `rubygems`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<String>,
    pub old: Package,
    pub new: Package,
}

impl DiffFile {
    /// Parse a diff from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid diff file: {}", e)))
    }

    /// Parse a diff from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::ParseError(format!("Invalid diff file: {}", e)))
    }

    /// Load a diff file, picking the format from the extension (TOML unless `.json`)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read diff file {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(
            "Loading {} diff from {}",
            if is_json { "JSON" } else { "TOML" },
            path.display()
        );

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Split into the frontend name and the package diff
    pub fn into_parts(self) -> (Option<String>, PackageDiff) {
        (self.frontend, PackageDiff::new(self.old, self.new))
    }
}
