// src/package/mod.rs

//! Upstream package descriptions
//!
//! A [`Package`] is what an upstream index (PyPI, CPAN, RubyGems) says about
//! one release: its version, its requirements per [`Phase`] and its source
//! archives. Two of them, old and new, make a [`PackageDiff`], which is the
//! only input the Portfile rewriter needs besides the Portfile itself.

mod diff;
mod phase;

pub use diff::{DiffFile, PackageDiff};
pub use phase::Phase;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A named dependency with an optional version constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    /// Version constraint such as `>=1.2, <2.0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier: Option<String>,
}

impl Requirement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specifier: None,
        }
    }

    pub fn with_specifier(name: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specifier: Some(specifier.into()),
        }
    }
}

/// Packaging format of a source archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// `.tar.gz` source distribution
    #[default]
    SourceTarGz,
    /// Ruby `.gem` file
    RubyGem,
}

impl ArchiveFormat {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SourceTarGz => "source-targz",
            Self::RubyGem => "rubygem",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "source-targz" => Ok(Self::SourceTarGz),
            "rubygem" => Ok(Self::RubyGem),
            _ => Err(Error::ParseError(format!("Unknown archive format: {}", s))),
        }
    }
}

/// A source artifact: where it lives, how big it is, what it hashes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub url: String,
    #[serde(default)]
    pub format: ArchiveFormat,
    /// Size in bytes, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Hex digests keyed by algorithm name (`sha256`, `rmd160`, ...)
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

impl Archive {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: ArchiveFormat::default(),
            size: None,
            checksums: BTreeMap::new(),
        }
    }

    /// Set the archive size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Add a checksum for `algorithm`
    pub fn with_checksum(mut self, algorithm: &str, digest: &str) -> Self {
        self.checksums
            .insert(algorithm.to_string(), digest.to_string());
        self
    }

    /// Look up the digest for a hash algorithm
    pub fn checksum(&self, algorithm: &str) -> Option<&str> {
        self.checksums.get(algorithm).map(String::as_str)
    }

    /// File name component of the archive URL
    pub fn filename(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }
}

/// One upstream release of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Requirements per phase. Unknown phase keys are rejected when deserializing.
    #[serde(default)]
    pub requirements: BTreeMap<Phase, Vec<Requirement>>,
    #[serde(default)]
    pub archives: Vec<Archive>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            homepage: None,
            requirements: BTreeMap::new(),
            archives: Vec::new(),
        }
    }

    /// Requirements declared for `phase` (empty when the phase is absent)
    pub fn requirements(&self, phase: Phase) -> &[Requirement] {
        self.requirements
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace the requirements of one phase
    pub fn set_requirements(&mut self, phase: Phase, requirements: Vec<Requirement>) {
        self.requirements.insert(phase, requirements);
    }

    /// Get the first archive of the given format
    pub fn get_archive(&self, format: ArchiveFormat) -> Result<&Archive> {
        self.archives
            .iter()
            .find(|a| a.format == format)
            .ok_or_else(|| Error::ArchiveUnavailable(format.to_string()))
    }
}
