//! Local git setup for freshly created projects
//!
//! Handles:
//! - Repository initialization
//! - Wiring the hosted repository as `origin`
//! - Renaming the default branch to `main`

mod operations;

pub use operations::{add_remote, branch_rename_force, init, is_available, remote_url};

use anyhow::Result;
use std::path::Path;

/// Name of the remote pointing at the hosted repository
pub const ORIGIN: &str = "origin";

/// Canonical default branch
pub const DEFAULT_BRANCH: &str = "main";

/// Initialize `repo` and point `origin` at `clone_url`.
///
/// Runs `git init`, `git remote add origin <url>`, `git branch -M main` in
/// order; the first failing step aborts and is named in the error.
pub fn init_with_remote(repo: &Path, clone_url: &str) -> Result<()> {
    init(repo)?;
    add_remote(repo, ORIGIN, clone_url)?;
    branch_rename_force(repo, DEFAULT_BRANCH)?;
    Ok(())
}
