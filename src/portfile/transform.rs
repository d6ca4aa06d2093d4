// src/portfile/transform.rs

//! Single-line Portfile rewrites
//!
//! Each function looks at one physical line (trailing newline included) and
//! either returns a rewritten copy or the line untouched. Matching is
//! anchored at the start of the line so that a version number appearing in
//! a comment or in an unrelated command is never rewritten.

use crate::package::Archive;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Commands whose arguments carry the port version
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(version|github\.setup|ruby\.setup|perl5\.setup)").unwrap()
});

static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^revision(\s+)(\d+)\n").unwrap());

// The leading group is greedy: with several digests on one line the last
// one is rewritten, matching how MacPorts lays out checksum continuations.
static CHECKSUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.*)(sha256|rmd160|sha1)(\s+)[0-9a-f]{40,64}(.*)").unwrap()
});

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*)size(\s+)\d+(.*)").unwrap());

/// Replace the first occurrence of `old_version` on a version-bearing line
pub fn update_version(line: &str, old_version: &str, new_version: &str) -> String {
    if old_version.is_empty() || !VERSION_RE.is_match(line) {
        return line.to_string();
    }
    line.replacen(old_version, new_version, 1)
}

/// Reset `revision N` to `revision 0`, keeping the original spacing
pub fn update_revision(line: &str) -> String {
    match REVISION_RE.captures(line) {
        Some(caps) => format!("revision{}0\n", &caps[1]),
        None => line.to_string(),
    }
}

/// Rewrite a checksum digest or the archive size
///
/// Does nothing unless both archives are known. Only the first matching
/// shape (checksum, then size) is rewritten.
pub fn update_archives(line: &str, old: Option<&Archive>, new: Option<&Archive>) -> String {
    let (Some(_), Some(new)) = (old, new) else {
        return line.to_string();
    };

    if let Some(caps) = CHECKSUM_RE.captures(line) {
        let algorithm = &caps[2];
        return match new.checksum(algorithm) {
            Some(digest) => {
                debug!("Updating {} checksum", algorithm);
                format!("{}{}{}{}{}", &caps[1], algorithm, &caps[3], digest, &caps[4])
            }
            None => {
                warn!(
                    "New archive has no {} checksum, leaving line unchanged",
                    algorithm
                );
                line.to_string()
            }
        };
    }

    if let Some(caps) = SIZE_RE.captures(line) {
        return match new.size {
            Some(size) => format!("{}size{}{}{}", &caps[1], &caps[2], size, &caps[3]),
            None => {
                warn!("New archive size unknown, leaving line unchanged");
                line.to_string()
            }
        };
    }

    line.to_string()
}
