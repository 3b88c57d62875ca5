//! Initialize a new presales project
//!
//! Public interface here, step logic in `internal.rs`.
//!
//! # Example
//!
//! ```no_run
//! use now_sc::commands::init::{self, InitOptions};
//! use now_sc::config::Config;
//! use now_sc::interactive::TerminalPrompter;
//!
//! let config = Config::from_env()?;
//! let options = InitOptions {
//!     name: Some("acme-poc".to_string()),
//!     customer: Some("Acme Corp".to_string()),
//!     no_github: true,
//! };
//! init::execute(&config, options, &mut TerminalPrompter::new())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::forge::Provisioned;
use crate::interactive::Prompter;
use crate::project::ProjectDescriptor;
use crate::templates::TemplateReport;

/// Default offered when no project name is given
pub const DEFAULT_PROJECT_NAME: &str = "presales-project";

/// Command-line options for `now-sc init`
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub name: Option<String>,
    pub customer: Option<String>,
    /// Skip GitHub repository creation
    pub no_github: bool,
}

/// What happened to the hosted repository step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryStatus {
    /// `--no-github` was given
    Skipped,
    /// No `GITHUB_PAT` in the environment
    NoToken,
    Created(Provisioned),
    /// Provisioning failed; the local project still stands
    Failed(String),
}

/// A project that was created on disk
#[derive(Debug, Clone)]
pub struct CreatedProject {
    pub root: PathBuf,
    pub descriptor: ProjectDescriptor,
    pub prompt_templates: Vec<PathBuf>,
    pub communication_templates: TemplateReport,
    pub repository: RepositoryStatus,
}

#[derive(Debug, Clone)]
pub enum InitOutcome {
    Created(CreatedProject),
    /// User declined to overwrite an existing directory
    Cancelled,
}

/// Execute the init command
///
/// # Process
///
/// 1. Resolve project and customer names (flags, else prompts)
/// 2. Confirm and remove an existing project directory
/// 3. Create the directory skeleton
/// 4. Fetch prompt templates (fatal on failure)
/// 5. Fetch communication templates (failures only warn)
/// 6. Write README.md, .env.example, .gitignore
/// 7. Create the GitHub repository unless `--no-github` or no `GITHUB_PAT`
///    (failure only warns)
/// 8. Print a summary and next steps
pub fn execute(
    config: &Config,
    options: InitOptions,
    prompter: &mut dyn Prompter,
) -> Result<InitOutcome> {
    internal::execute_init(config, options, prompter)
}
