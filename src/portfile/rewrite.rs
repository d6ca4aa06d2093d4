// src/portfile/rewrite.rs

//! One rewrite pass over a Portfile

use super::depends::{DependsCoordinator, ReqFormat};
use super::transform::{update_archives, update_revision, update_version};
use crate::package::{Archive, ArchiveFormat, PackageDiff, Phase};
use tracing::{debug, info};

/// Comment written before dependency blocks that had no place in the original file
pub const MOVE_SENTINEL: &str = "#TODO: Move this\n";

/// What a rewrite pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Single lines changed by the version, revision or archive rewrites
    pub lines_changed: usize,
    /// Phases whose existing block had entries added or removed
    pub regenerated: Vec<Phase>,
    /// New blocks were appended at the end of the file
    pub appended: bool,
}

/// Rewrites Portfile text for the update described by a [`PackageDiff`]
pub struct PortfileRewriter<'a> {
    diff: &'a PackageDiff,
    formatter: &'a dyn ReqFormat,
    archive_format: ArchiveFormat,
}

impl<'a> PortfileRewriter<'a> {
    pub fn new(diff: &'a PackageDiff, formatter: &'a dyn ReqFormat) -> Self {
        Self {
            diff,
            formatter,
            archive_format: ArchiveFormat::default(),
        }
    }

    /// Select which archive's checksums and size are written
    pub fn archive_format(mut self, format: ArchiveFormat) -> Self {
        self.archive_format = format;
        self
    }

    fn archives(&self) -> (Option<&'a Archive>, Option<&'a Archive>) {
        let old = self.diff.old.get_archive(self.archive_format);
        let new = self.diff.new.get_archive(self.archive_format);
        match (old, new) {
            (Ok(old), Ok(new)) => (Some(old), Some(new)),
            (Err(e), _) | (_, Err(e)) => {
                debug!("Skipping checksum and size updates: {}", e);
                (None, None)
            }
        }
    }

    /// Rewrite `original`, returning the new text
    pub fn rewrite(&self, original: &str) -> String {
        self.rewrite_with_report(original).0
    }

    /// Rewrite `original`, returning the new text and a summary of the changes
    pub fn rewrite_with_report(&self, original: &str) -> (String, RewriteReport) {
        let (old_archive, new_archive) = self.archives();
        let old_version = self.diff.old_version();
        let new_version = self.diff.new_version();

        let mut coordinator = DependsCoordinator::new(self.diff, self.formatter);
        let mut report = RewriteReport::default();
        let mut out = String::with_capacity(original.len());

        for line in original.split_inclusive('\n') {
            let depends = coordinator.process_line(line);
            if depends.matched {
                // Lines inside a block produce nothing until the block ends.
                if let Some(block) = depends.block {
                    out.push_str(&block);
                }
                continue;
            }

            let updated = update_version(line, old_version, new_version);
            let updated = update_revision(&updated);
            let updated = update_archives(&updated, old_archive, new_archive);
            if updated != line {
                report.lines_changed += 1;
            }
            out.push_str(&updated);
        }

        let appended = coordinator.flush();
        report.regenerated = coordinator.rendered_phases().to_vec();
        if !appended.is_empty() {
            info!("Appending dependency blocks that need manual placement");
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(MOVE_SENTINEL);
            out.push_str(&appended);
            report.appended = true;
        }

        (out, report)
    }
}

/// Rewrite Portfile text using the default (source tarball) archive
pub fn rewrite(original: &str, diff: &PackageDiff, formatter: &dyn ReqFormat) -> String {
    PortfileRewriter::new(diff, formatter).rewrite(original)
}
