// src/portfile/mod.rs

//! In-place Portfile rewriting
//!
//! Updating a port to a new upstream release touches a handful of lines:
//! the version, the revision, the checksums and size of the distfile, and
//! the `depends_*-append` blocks whose requirements changed. Everything else
//! must come out byte-for-byte identical, including the maintainer's
//! alignment and line continuations.
//!
//! There is no grammar for Portfiles here. The rewrite is a single pass of
//! line-local pattern matching:
//!
//! - [`transform`] holds the single-line rewrites (version, revision,
//!   checksums/size)
//! - [`depends`] tracks multi-line dependency blocks and regenerates them
//!   from their entries plus the requirement changes
//! - [`rewrite`](mod@rewrite) drives the pass and appends blocks for phases the
//!   Portfile never declared
//!
//! # Example
//!
//! ```
//! use portup::package::{Package, PackageDiff, Phase, Requirement};
//! use portup::portfile::rewrite;
//!
//! let old = Package::new("foo", "1.0");
//! let mut new = Package::new("foo", "1.1");
//! new.set_requirements(Phase::Run, vec![Requirement::new("bar")]);
//! let diff = PackageDiff::new(old, new);
//!
//! let portfile = "version 1.0\ndepends_lib-append port:baz\n";
//! let updated = rewrite(portfile, &diff, &|req: &Requirement| req.name.clone());
//! assert_eq!(
//!     updated,
//!     "version 1.1\ndepends_lib-append port:baz \\\n                   port:bar\n"
//! );
//! ```

pub mod depends;
pub mod rewrite;
pub mod transform;

pub use depends::{DependsCoordinator, DependsTracker, ReqFormat};
pub use rewrite::{rewrite, PortfileRewriter, RewriteReport, MOVE_SENTINEL};
