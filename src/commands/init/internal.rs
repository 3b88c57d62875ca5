//! Internal implementation for init command

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use super::{CreatedProject, InitOptions, InitOutcome, RepositoryStatus, DEFAULT_PROJECT_NAME};
use crate::config::{Config, GITHUB_TOKEN_VAR, OPENROUTER_API_KEY_VAR};
use crate::forge::{self, GitHubWriter};
use crate::http;
use crate::interactive::{input_required, Prompter};
use crate::paths;
use crate::project::{self, validate_customer_name, validate_project_name, ProjectDescriptor};
use crate::templates::{self, TemplateReport};

/// Main execution logic for init command
pub fn execute_init(
    config: &Config,
    options: InitOptions,
    prompter: &mut dyn Prompter,
) -> Result<InitOutcome> {
    let no_github = options.no_github;
    let descriptor = resolve_descriptor(options, prompter)?;
    let name = descriptor.name();
    let customer = descriptor.customer_name();
    let root = config.working_dir.join(name);

    if root.exists() {
        let overwrite =
            prompter.confirm(&format!("Directory {} already exists. Overwrite?", name), false)?;
        if !overwrite {
            println!("{}", "Project initialization cancelled.".yellow());
            return Ok(InitOutcome::Cancelled);
        }
        fs::remove_dir_all(&root).context("failed to remove existing directory")?;
    }

    println!("{}", "Creating project structure...".cyan());
    project::create_structure(&root, customer).context("failed to create project structure")?;

    let client = http::client()?;

    println!("{}", "Fetching base prompts from GitHub...".cyan());
    let prompt_templates = templates::fetch_prompt_templates(
        &client,
        &config.endpoints.prompts_url,
        &paths::prompt_templates_dir(&root),
    )
    .context("failed to fetch prompts")?;

    println!("{}", "Fetching communication templates...".cyan());
    let communication_templates = templates::fetch_communication_templates(
        &client,
        &config.endpoints.templates_url,
        &paths::communication_templates_dir(&root),
    );
    report_skipped_templates(&communication_templates);

    project::write_project_files(&root, &descriptor).context("failed to create project files")?;

    println!(
        "{}",
        format!("✓ Project \"{}\" created successfully!", name).green()
    );

    // Opt-out wins over credentials
    let repository = if no_github {
        println!("\nSkipped GitHub repository creation.");
        RepositoryStatus::Skipped
    } else if let Some(token) = config.github_token.as_deref() {
        create_github_repository(config, &client, token, &root, &descriptor)
    } else {
        println!(
            "{}",
            format!(
                "\nNote: {} environment variable not set. Skipping GitHub repository creation.",
                GITHUB_TOKEN_VAR
            )
            .yellow()
        );
        println!("To enable automatic repository creation, set your GitHub Personal Access Token:");
        println!("  export {}=your_token_here", GITHUB_TOKEN_VAR);
        RepositoryStatus::NoToken
    };

    print_summary(&root, name, customer);

    Ok(InitOutcome::Created(CreatedProject {
        root,
        descriptor,
        prompt_templates,
        communication_templates,
        repository,
    }))
}

/// Project name from flag or prompt; customer name from flag or repeated prompt.
fn resolve_descriptor(
    options: InitOptions,
    prompter: &mut dyn Prompter,
) -> Result<ProjectDescriptor> {
    let name = match options.name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None => loop {
            let name = input_required(
                prompter,
                "Project name",
                Some(DEFAULT_PROJECT_NAME),
                "project name is required",
            )?;
            match validate_project_name(&name) {
                Ok(()) => break name,
                Err(e) => eprintln!("✗ {}", e),
            }
        },
    };

    let customer = match options.customer.filter(|c| !c.trim().is_empty()) {
        Some(customer) => customer,
        None => loop {
            let customer =
                input_required(prompter, "Customer name", None, "customer name is required")?;
            match validate_customer_name(&customer) {
                Ok(()) => break customer,
                Err(e) => eprintln!("✗ {}", e),
            }
        },
    };

    ProjectDescriptor::new(name, customer)
}

fn report_skipped_templates(report: &TemplateReport) {
    if report.is_complete() {
        return;
    }
    println!("{}", "\nWarning: Failed to fetch some templates".yellow());
    for skipped in &report.skipped {
        println!("  - {}: {}", skipped.filename, skipped.reason);
    }
}

fn create_github_repository(
    config: &Config,
    client: &reqwest::blocking::Client,
    token: &str,
    root: &Path,
    descriptor: &ProjectDescriptor,
) -> RepositoryStatus {
    println!("{}", "Creating GitHub repository...".cyan());

    let writer = GitHubWriter::new(client.clone(), &config.endpoints.github_api_url, token);
    let description = format!("Presales project for {}", descriptor.customer_name());

    match forge::provision(
        &writer,
        &config.endpoints.github_org,
        root,
        descriptor.name(),
        &description,
    ) {
        Ok(provisioned) => {
            println!("{}", "✓ GitHub repository created!".green());
            println!(
                "{}",
                format!("Repository URL: {}", provisioned.repository.html_url).cyan()
            );
            println!("{}", "Git initialized with remote origin set.".dimmed());
            println!(
                "{}",
                "To push your code: git add . && git commit -m \"Initial commit\" && \
                 git push -u origin main"
                    .dimmed()
            );
            RepositoryStatus::Created(provisioned)
        }
        Err(e) => {
            tracing::warn!(error = %e, "repository provisioning failed");
            println!(
                "{}",
                format!("✗ GitHub repository creation failed: {:#}", e).red()
            );
            println!("{}", "You can create the repository manually later.".yellow());
            RepositoryStatus::Failed(format!("{:#}", e))
        }
    }
}

fn print_summary(root: &Path, name: &str, customer: &str) {
    println!();
    println!("{}", "Project structure created:".cyan());
    println!("  {}/", root.display());
    println!("  ├── {}/", paths::INBOX);
    println!("  ├── {}/{}/", paths::CUSTOMERS, customer);
    println!("  ├── {}/", paths::PROMPT_TEMPLATES);
    println!("  ├── {}/", paths::DEMO_LIBRARY);
    println!("  ├── {}/", paths::COMMUNICATION_TEMPLATES);
    println!("  └── {}/", paths::ASSETS);

    println!();
    println!("{}", "Next steps:".yellow());
    println!("  1. cd {}", name);
    println!("  2. Set your {} environment variable", OPENROUTER_API_KEY_VAR);
    println!("  3. Run \"now-sc prompt\" to execute prompts");
}
