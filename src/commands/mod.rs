// src/commands/mod.rs

//! Command handlers for the portup CLI

mod cpan_version;
mod current_version;
mod update;

pub use cpan_version::cmd_cpan_version;
pub use current_version::cmd_current_version;
pub use update::{cmd_update, UpdateOptions};
