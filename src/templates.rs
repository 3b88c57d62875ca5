//! Remote template fetching.
//!
//! Two operations with deliberately different failure contracts:
//!
//! - [`fetch_prompt_templates`] lists a GitHub contents directory and
//!   downloads every Markdown file. Prompt templates are essential, so any
//!   failure aborts and is returned as an error.
//! - [`fetch_communication_templates`] downloads a fixed set of files. They
//!   are optional, so failures are collected in a [`TemplateReport`] and the
//!   function itself cannot fail.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::http;

/// Suffix of files treated as prompt templates.
pub const PROMPT_SUFFIX: &str = ".md";

/// Communication templates downloaded on `init`, relative to the templates base URL.
pub const COMMUNICATION_TEMPLATES: &[&str] = &["servicenow_poc_status_template.html"];

/// One entry of a GitHub contents listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub download_url: Option<String>,
}

impl RemoteFile {
    /// Regular file with the prompt suffix
    pub fn is_prompt_template(&self) -> bool {
        self.kind == "file" && self.name.ends_with(PROMPT_SUFFIX)
    }
}

/// Communication template that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTemplate {
    pub filename: String,
    pub reason: String,
}

/// Outcome of the best-effort communication template fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateReport {
    pub saved: Vec<PathBuf>,
    pub skipped: Vec<SkippedTemplate>,
}

impl TemplateReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// List `listing_url` and download every prompt template into `dest`.
///
/// Files written before a failing item stay on disk; the failing item is not
/// written. A template without a download URL is a failure. Returns the
/// written paths in listing order.
pub fn fetch_prompt_templates(
    client: &Client,
    listing_url: &str,
    dest: &Path,
) -> Result<Vec<PathBuf>> {
    let listing = list_remote_files(client, listing_url)?;

    let mut written = Vec::new();
    for file in listing.iter().filter(|f| f.is_prompt_template()) {
        let url = file
            .download_url
            .as_deref()
            .with_context(|| format!("No download URL for {}", file.name))?;
        let content = http::get_bytes(client, url)
            .with_context(|| format!("Failed to download {}", file.name))?;

        let path = dest.join(&file.name);
        fs::write(&path, content).with_context(|| format!("Failed to save {}", file.name))?;
        tracing::debug!(path = %path.display(), "prompt template saved");
        written.push(path);
    }

    Ok(written)
}

/// Fetch and decode a GitHub contents listing.
pub fn list_remote_files(client: &Client, listing_url: &str) -> Result<Vec<RemoteFile>> {
    tracing::debug!(url = %listing_url, "listing remote templates");
    let response = client
        .get(listing_url)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .context("Failed to fetch prompts")?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        anyhow::bail!("GitHub API returned status {}", status.as_u16());
    }

    response
        .json::<Vec<RemoteFile>>()
        .context("Failed to decode response")
}

/// Download every entry of [`COMMUNICATION_TEMPLATES`] from `base_url` into `dest`.
pub fn fetch_communication_templates(
    client: &Client,
    base_url: &str,
    dest: &Path,
) -> TemplateReport {
    let base = base_url.trim_end_matches('/');
    let items = COMMUNICATION_TEMPLATES
        .iter()
        .map(|name| (format!("{}/{}", base, name), name.to_string()));
    fetch_best_effort(client, items, dest)
}

/// Download `(url, filename)` pairs, skipping any that fail.
pub fn fetch_best_effort<I>(client: &Client, items: I, dest: &Path) -> TemplateReport
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut report = TemplateReport::default();

    for (url, filename) in items {
        let path = dest.join(&filename);
        let result = http::get_bytes(client, &url).and_then(|content| {
            fs::write(&path, content).with_context(|| format!("Failed to save {}", filename))
        });

        match result {
            Ok(()) => report.saved.push(path),
            Err(e) => {
                tracing::warn!(%url, error = %e, "skipping communication template");
                report.skipped.push(SkippedTemplate {
                    filename,
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    report
}
