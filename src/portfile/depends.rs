// src/portfile/depends.rs

//! Dependency block tracking and regeneration
//!
//! A dependency block is a `depends_<kind>-append` command, possibly wrapped
//! over several physical lines with a trailing backslash:
//!
//! ```text
//!     depends_lib-append  port:py${python.version}-setuptools \
//!                         port:py${python.version}-six
//! ```
//!
//! A [`DependsTracker`] absorbs one such block for one [`Phase`], applies
//! the requirement changes from a [`PackageDiff`] and renders the block
//! again with the indentation it learned from the original text. The
//! [`DependsCoordinator`] owns one tracker per phase and routes lines to
//! them.

use crate::package::{PackageDiff, Phase, Requirement};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// First line of any dependency block: indentation, kind, separator, rest
///
/// The newline is optional so a block on the last, unterminated line of a
/// Portfile is still recognised.
static DEPENDS_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)depends_([a-z]+)-append([ \t]+)(.*\n?)").unwrap());

/// Prefix of every dependency entry written to a Portfile
pub const ENTRY_NAMESPACE: &str = "port";

/// Turns an upstream requirement into the name used inside a `port:` entry
///
/// Implemented for any `Fn(&Requirement) -> String`, so a closure can be
/// passed wherever a formatter is expected.
pub trait ReqFormat {
    fn format_requirement(&self, req: &Requirement) -> String;
}

impl<F> ReqFormat for F
where
    F: Fn(&Requirement) -> String,
{
    fn format_requirement(&self, req: &Requirement) -> String {
        self(req)
    }
}

/// Build the full `port:<name>` entry for a requirement
pub fn format_entry(formatter: &dyn ReqFormat, req: &Requirement) -> String {
    format!("{}:{}", ENTRY_NAMESPACE, formatter.format_requirement(req))
}

/// Outcome of feeding one line to a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineMatch {
    /// The line belongs to this tracker's block
    pub matched: bool,
    /// The line was the last one of the block
    pub finished: bool,
}

/// State machine for the dependency block of one phase
#[derive(Debug, Clone)]
pub struct DependsTracker {
    phase: Phase,
    keyword: String,
    in_section: bool,
    /// Whitespace before the keyword on the first line
    first_line_indent: String,
    /// Whitespace between the keyword and the first entry
    separator: String,
    /// Indentation of continuation lines, learned from the block itself
    next_lines_indent: Option<String>,
    /// Entries of the block, in file order
    deps: Vec<String>,
    /// The block exactly as read
    raw: String,
    /// `update` added or removed an entry
    changed: bool,
}

impl DependsTracker {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            keyword: phase.depends_keyword(),
            in_section: false,
            first_line_indent: String::new(),
            separator: " ".to_string(),
            next_lines_indent: None,
            deps: Vec::new(),
            raw: String::new(),
            changed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn in_section(&self) -> bool {
        self.in_section
    }

    /// Entries currently associated with the block
    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    /// Whether the last `update` touched the entries
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Feed one physical line (including its newline)
    pub fn process_line(&mut self, line: &str) -> LineMatch {
        let mut content = line;

        if !self.in_section {
            let Some(caps) = DEPENDS_START_RE.captures(line) else {
                return LineMatch::default();
            };
            let (Some(indent), Some(kind), Some(separator), Some(rest)) =
                (caps.get(1), caps.get(2), caps.get(3), caps.get(4))
            else {
                return LineMatch::default();
            };
            if kind.as_str() != self.phase.macports_kind() {
                return LineMatch::default();
            }
            debug!("Entering {} block", self.keyword);
            self.in_section = true;
            self.first_line_indent = indent.as_str().to_string();
            self.separator = separator.as_str().to_string();
            content = rest.as_str();
        }

        if self.next_lines_indent.is_none() {
            let indent_len = content.len() - content.trim_start_matches([' ', '\t']).len();
            if indent_len > 0 {
                self.next_lines_indent = Some(content[..indent_len].to_string());
            }
        }

        self.raw.push_str(line);
        self.deps.push(clean_depends_line(content).to_string());

        let finished = !content.ends_with("\\\n");
        if finished {
            self.in_section = false;
        }
        LineMatch {
            matched: true,
            finished,
        }
    }

    /// Close a block left open at end of input
    pub fn close(&mut self) {
        self.in_section = false;
    }

    /// Apply the requirement changes of `diff` for this tracker's phase
    pub fn update(&mut self, diff: &PackageDiff, formatter: &dyn ReqFormat) {
        for req in diff.deleted_requirements(self.phase) {
            let entry = format_entry(formatter, req);
            // Upstream may drop a requirement that was never listed here.
            if let Some(pos) = self.deps.iter().position(|d| *d == entry) {
                debug!("Removing {} from {}", entry, self.keyword);
                self.deps.remove(pos);
                self.changed = true;
            }
        }

        // A "new" requirement may already be listed when the old upstream
        // metadata under-declared it.
        for req in diff.new_requirements(self.phase) {
            let entry = format_entry(formatter, req);
            if !self.deps.contains(&entry) {
                debug!("Adding {} to {}", entry, self.keyword);
                self.deps.push(entry);
                self.changed = true;
            }
        }
    }

    /// Text to emit for the block
    ///
    /// A block whose entries were not touched comes out exactly as read,
    /// alignment and all. Anything else is rebuilt by
    /// [`build_depends_line`](Self::build_depends_line).
    pub fn render(&self) -> String {
        if self.changed || self.raw.is_empty() {
            self.build_depends_line()
        } else {
            self.raw.clone()
        }
    }

    /// Render the block; empty when it has no entries left
    pub fn build_depends_line(&self) -> String {
        if self.deps.iter().all(String::is_empty) {
            return String::new();
        }

        let next_lines_indent = match &self.next_lines_indent {
            Some(indent) => indent.clone(),
            None => format!(
                "{}{}{}",
                self.first_line_indent,
                " ".repeat(self.keyword.len()),
                self.separator
            ),
        };

        let mut block = format!("{}{}", self.first_line_indent, self.keyword);
        if self.deps[0].is_empty() {
            // Keep the column of the trailing backslash where it was.
            block.push_str(&" ".repeat(self.separator.len().saturating_sub(1)));
        } else {
            block.push_str(&self.separator);
        }

        let joiner = format!(" \\\n{}", next_lines_indent);
        block.push_str(&self.deps.join(&joiner));
        block.push('\n');
        block
    }
}

/// Strip the newline, a trailing backslash and surrounding whitespace
pub fn clean_depends_line(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\\').unwrap_or(line);
    line.trim()
}

/// Outcome of feeding one line to the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockLine {
    /// The line was part of a dependency block
    pub matched: bool,
    /// The regenerated block, once its last line has been seen
    pub block: Option<String>,
}

/// Routes Portfile lines to the per-phase trackers
///
/// A tracker leaves `pending` when its block starts and is dropped as soon
/// as the block is rendered, so a phase can only be regenerated once per
/// pass.
pub struct DependsCoordinator<'a> {
    diff: &'a PackageDiff,
    formatter: &'a dyn ReqFormat,
    pending: BTreeMap<Phase, DependsTracker>,
    current: Option<DependsTracker>,
    rendered: Vec<Phase>,
}

impl<'a> DependsCoordinator<'a> {
    pub fn new(diff: &'a PackageDiff, formatter: &'a dyn ReqFormat) -> Self {
        let pending = Phase::ALL
            .into_iter()
            .map(|phase| (phase, DependsTracker::new(phase)))
            .collect();

        Self {
            diff,
            formatter,
            pending,
            current: None,
            rendered: Vec::new(),
        }
    }

    /// Phases whose existing block had entries added or removed so far
    pub fn rendered_phases(&self) -> &[Phase] {
        &self.rendered
    }

    /// Feed one physical line of the Portfile
    pub fn process_line(&mut self, line: &str) -> BlockLine {
        if let Some(mut tracker) = self.current.take() {
            let result = tracker.process_line(line);
            return self.settle(tracker, result);
        }

        let mut hit = None;
        for (phase, tracker) in self.pending.iter_mut() {
            let result = tracker.process_line(line);
            if result.matched {
                hit = Some((*phase, result));
                break;
            }
        }

        match hit {
            Some((phase, result)) => match self.pending.remove(&phase) {
                Some(tracker) => self.settle(tracker, result),
                None => BlockLine::default(),
            },
            None => BlockLine::default(),
        }
    }

    fn settle(&mut self, tracker: DependsTracker, result: LineMatch) -> BlockLine {
        if result.finished {
            BlockLine {
                matched: true,
                block: Some(self.render(tracker)),
            }
        } else {
            self.current = Some(tracker);
            BlockLine {
                matched: true,
                block: None,
            }
        }
    }

    fn render(&mut self, mut tracker: DependsTracker) -> String {
        tracker.update(self.diff, self.formatter);
        if tracker.changed() {
            self.rendered.push(tracker.phase());
        }
        tracker.render()
    }

    /// Render everything not emitted yet
    ///
    /// A block still open at end of input comes first, followed by the
    /// phases that never appeared in the Portfile, test first and build last.
    pub fn flush(&mut self) -> String {
        let mut out = String::new();

        if let Some(mut tracker) = self.current.take() {
            debug!("Closing unterminated {} block", tracker.keyword());
            tracker.close();
            out.push_str(&self.render(tracker));
        }

        let pending = std::mem::take(&mut self.pending);
        for (_, mut tracker) in pending.into_iter().rev() {
            tracker.update(self.diff, self.formatter);
            out.push_str(&tracker.build_depends_line());
        }
        out
    }
}
