// src/package/phase.rs

//! Dependency phases and their Portfile keywords

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When a dependency is needed
///
/// The set is closed: every phase maps to exactly one Portfile
/// `depends_<kind>-append` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Needed to build the port
    Build,
    /// Needed at runtime, declared as `depends_lib`
    Run,
    /// Needed to run the test suite
    Test,
}

impl Phase {
    /// All phases, in the order trackers are consulted
    pub const ALL: [Phase; 3] = [Phase::Build, Phase::Run, Phase::Test];

    /// Get the phase name as used in package metadata
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Run => "run",
            Self::Test => "test",
        }
    }

    /// Get the MacPorts dependency kind for this phase
    pub const fn macports_kind(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Run => "lib",
            Self::Test => "test",
        }
    }

    /// Get the full block keyword, e.g. `depends_lib-append`
    pub fn depends_keyword(&self) -> String {
        format!("depends_{}-append", self.macports_kind())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Self::Build),
            "run" => Ok(Self::Run),
            "test" => Ok(Self::Test),
            _ => Err(Error::UnknownPhase(s.to_string())),
        }
    }
}
