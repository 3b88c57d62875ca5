//! Low-level git operations, each run inside an explicit repository directory

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Run `git <args>` in `repo`, failing with the command line and stderr.
fn run_git(repo: &Path, args: &[&str]) -> Result<()> {
    let command_line = format!("git {}", args.join(" "));
    tracing::debug!(repo = %repo.display(), command = %command_line, "running git");

    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .with_context(|| format!("Failed to run {}. Is git installed?", command_line))?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to run {}: {}",
            command_line,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Initialize a repository
pub fn init(repo: &Path) -> Result<()> {
    run_git(repo, &["init"])
}

/// Add a git remote
pub fn add_remote(repo: &Path, name: &str, url: &str) -> Result<()> {
    run_git(repo, &["remote", "add", name, url])
}

/// Rename the current branch, overwriting any branch with that name
pub fn branch_rename_force(repo: &Path, new: &str) -> Result<()> {
    run_git(repo, &["branch", "-M", new])
}

/// Get remote URL
pub fn remote_url(repo: &Path, remote: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", remote])
        .current_dir(repo)
        .output()
        .context("Failed to get remote URL")?;

    if !output.status.success() {
        anyhow::bail!("Remote '{}' not found", remote);
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Check if git is available on PATH
pub fn is_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
