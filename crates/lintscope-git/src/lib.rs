//! The only crate that spawns git.
//!
//! [`GitExecutor`] implements the domain's [`lintscope_domain::RevisionQuery`] port;
//! [`list_changed_files`] turns a resolved base into the changed-file set for a scope.

#![forbid(unsafe_code)]

mod executor;
mod lister;

pub use executor::GitExecutor;
pub use lister::list_changed_files;
