// src/lib.rs

//! portup: incremental MacPorts Portfile updater
//!
//! Brings an existing Portfile up to a new upstream release while leaving
//! every line that did not need to change byte-for-byte identical.
//!
//! # Architecture
//!
//! - `package`: upstream package descriptions and the old/new [`PackageDiff`]
//! - `portfile`: the line-based rewrite engine (single-line transforms,
//!   dependency block trackers, the rewrite pass)
//! - `frontend`: per-ecosystem naming rules (pypi, cpan, rubygems)
//! - `ports`: ports tree access (Portfile paths, `port info`, atomic write-back)
//! - `config`: user configuration

pub mod config;
mod error;
pub mod frontend;
pub mod package;
pub mod portfile;
pub mod ports;

pub use config::Config;
pub use error::{Error, Result};
pub use frontend::Frontend;
pub use package::{Archive, ArchiveFormat, DiffFile, Package, PackageDiff, Phase, Requirement};
pub use portfile::{rewrite, PortfileRewriter, ReqFormat, RewriteReport};
