// src/frontend/mod.rs

//! Upstream ecosystems and their MacPorts naming conventions
//!
//! Each upstream index maps onto one MacPorts category with its own naming
//! scheme for ports, port directories and dependency entries:
//!
//! | Frontend | Category | Port directory | Dependency entry |
//! |----------|----------|----------------|------------------|
//! | pypi | python | `py-<name>` | `py${python.version}-<name>` |
//! | cpan | perl | `p5-<name>` | `p${perl5.major}-<name>` |
//! | rubygems | ruby | `rb-<name>` | `rb${ruby.suffix}-<name>` |

pub mod cpan;

use crate::error::{Error, Result};
use crate::package::{ArchiveFormat, Package, Requirement};
use crate::portfile::ReqFormat;
use std::fmt;
use std::str::FromStr;

/// Upstream package index a port tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frontend {
    Pypi,
    Cpan,
    Rubygems,
}

impl Frontend {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pypi => "pypi",
            Self::Cpan => "cpan",
            Self::Rubygems => "rubygems",
        }
    }

    /// MacPorts category holding ports of this ecosystem
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Pypi => "python",
            Self::Cpan => "perl",
            Self::Rubygems => "ruby",
        }
    }

    /// Archive whose checksums are recorded in the Portfile
    pub const fn archive_format(&self) -> ArchiveFormat {
        match self {
            Self::Pypi | Self::Cpan => ArchiveFormat::SourceTarGz,
            Self::Rubygems => ArchiveFormat::RubyGem,
        }
    }

    /// Port name for an upstream package name
    pub fn port_name(&self, name: &str) -> String {
        match self {
            Self::Pypi => format!("py-{}", name.to_lowercase()),
            Self::Cpan => name.replace("::", "-"),
            Self::Rubygems => name.to_string(),
        }
    }

    /// Directory of the port inside its category
    pub fn port_folder(&self, name: &str) -> String {
        match self {
            Self::Pypi => format!("py-{}", name.to_lowercase()),
            Self::Cpan => format!("p5-{}", name.to_lowercase().replace("::", "-")),
            Self::Rubygems => format!("rb-{}", name.to_lowercase()),
        }
    }

    /// Dependency name for a requirement, without the `port:` prefix
    pub fn format_requirement(&self, req: &Requirement) -> String {
        match self {
            Self::Pypi => format!("py${{python.version}}-{}", req.name.to_lowercase()),
            Self::Cpan => format!(
                "p${{perl5.major}}-{}",
                self.port_name(&req.name).to_lowercase()
            ),
            Self::Rubygems => format!("rb${{ruby.suffix}}-{}", req.name.to_lowercase()),
        }
    }

    /// Homepage to put in the Portfile, if the PortGroup default is not enough
    pub fn homepage(&self, pkg: &Package) -> Option<String> {
        let homepage = pkg.homepage.as_deref().unwrap_or_default();
        match self {
            Self::Pypi if homepage.starts_with("http") => Some(homepage.to_string()),
            Self::Pypi => Some(format!("https://pypi.org/project/{}", pkg.name)),
            Self::Rubygems if homepage.starts_with("http") => Some(homepage.to_string()),
            Self::Rubygems => Some(format!("https://rubygems.org/gems/{}", pkg.name)),
            // The perl5 PortGroup already points at metacpan.
            Self::Cpan if homepage.starts_with("http") && !homepage.contains("metacpan.org/pod") => {
                Some(homepage.to_string())
            }
            Self::Cpan => None,
        }
    }

    /// Rewrite a requirement specifier into the form MacPorts compares against
    pub fn normalize_specifier(&self, specifier: &str) -> String {
        match self {
            Self::Cpan => cpan::normalize_cpan_specifier(specifier),
            Self::Pypi | Self::Rubygems => specifier.to_string(),
        }
    }
}

impl ReqFormat for Frontend {
    fn format_requirement(&self, req: &Requirement) -> String {
        Frontend::format_requirement(self, req)
    }
}

impl fmt::Display for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frontend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pypi" => Ok(Self::Pypi),
            "cpan" => Ok(Self::Cpan),
            "rubygems" => Ok(Self::Rubygems),
            _ => Err(Error::UnhandledFrontend(s.to_string())),
        }
    }
}
