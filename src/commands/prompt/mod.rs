//! Run a saved prompt template against OpenRouter
//!
//! Lists `10_PromptTemplates/*.md` in the current project, lets the user pick
//! one, sends it with free-text input, and optionally saves the exchange as
//! Markdown under one of the project's asset folders.

mod internal;

pub use internal::{
    default_filename, display_label, list_prompt_templates, preview, project_relative,
    render_output,
};

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::interactive::Prompter;
use crate::paths;

/// Characters of the template shown before sending
pub const PREVIEW_CHARS: usize = 200;

/// Where a saved response goes, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDestination {
    ProjectOverview,
    Communications,
    PocDocuments,
    Notes,
    /// User-entered path
    Other(PathBuf),
}

impl SaveDestination {
    /// Menu entries, in index order; the last one asks for a path
    pub const MENU: &'static [&'static str] = &[
        "Project Overview (99_Assets/Project_Overview)",
        "Communications (99_Assets/Communications)",
        "POC Documents (99_Assets/POC_Documents)",
        "Notes (00_Inbox/notes)",
        "Other (specify)",
    ];

    /// Default for the "Other" path prompt
    pub const OTHER_DEFAULT: &'static str = paths::ASSETS;

    /// Preset for a menu index; `None` for "Other" and out-of-range indices
    pub fn preset(index: usize) -> Option<Self> {
        match index {
            0 => Some(SaveDestination::ProjectOverview),
            1 => Some(SaveDestination::Communications),
            2 => Some(SaveDestination::PocDocuments),
            3 => Some(SaveDestination::Notes),
            _ => None,
        }
    }

    pub fn relative_path(&self) -> PathBuf {
        match self {
            SaveDestination::ProjectOverview => {
                PathBuf::from(paths::ASSETS).join("Project_Overview")
            }
            SaveDestination::Communications => PathBuf::from(paths::ASSETS).join("Communications"),
            SaveDestination::PocDocuments => PathBuf::from(paths::ASSETS).join("POC_Documents"),
            SaveDestination::Notes => PathBuf::from(paths::INBOX).join("notes"),
            SaveDestination::Other(path) => path.clone(),
        }
    }
}

/// One prompt run: template, input, and the model's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    /// File name of the template, e.g. `Discovery_Call.md`
    pub template_name: String,
    pub system_content: String,
    pub user_content: String,
    pub response_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Saved(PathBuf),
    /// User chose not to save the response
    NotSaved,
}

/// Execute the prompt command in `config.working_dir`
///
/// # Errors
///
/// Returns an error if:
/// - `OPENROUTER_API_KEY` is not set
/// - There is no `10_PromptTemplates/` directory or it holds no `.md` files
/// - The API call fails or returns no choices
/// - The output file cannot be written
pub fn execute(config: &Config, prompter: &mut dyn Prompter) -> Result<PromptOutcome> {
    internal::execute_prompt(config, prompter)
}
