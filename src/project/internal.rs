//! Internal implementation for project scaffolding

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{DirNode, ProjectDescriptor};
use crate::paths;

pub(super) fn create_tree(root: &Path, nodes: &[DirNode], customer: &str) -> Result<()> {
    create_dir(root)?;

    let mut planned = Vec::new();
    collect_tree(root, nodes, customer, &mut planned);
    for dir in &planned {
        create_dir(dir)?;
    }

    tracing::debug!(root = %root.display(), dirs = planned.len(), "project structure created");
    Ok(())
}

pub(super) fn collect_tree(
    base: &Path,
    nodes: &[DirNode],
    customer: &str,
    out: &mut Vec<PathBuf>,
) {
    for node in nodes {
        match *node {
            DirNode::Dir { name, children } => {
                let path = base.join(name);
                out.push(path.clone());
                collect_tree(&path, children, customer, out);
            }
            DirNode::CustomerSlot { name } => {
                let slot = base.join(name);
                out.push(slot.clone());
                out.push(slot.join(customer));
            }
        }
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory {}", path.display()))
}

pub(super) fn write_files(root: &Path, descriptor: &ProjectDescriptor) -> Result<()> {
    write_file(&paths::files::readme(root), &readme(descriptor))?;
    write_file(&paths::files::env_example(root), ENV_EXAMPLE)?;
    write_file(&paths::files::gitignore(root), GITIGNORE)?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to create {}", path.display()))
}

fn readme(descriptor: &ProjectDescriptor) -> String {
    let name = descriptor.name();
    let customer = descriptor.customer_name();

    format!(
        r#"# {name}

## Customer: {customer}

This project was bootstrapped with Now-SC CLI tool.

## Directory Structure

- **00_Inbox/** - Raw meeting notes and transcripts
  - calls/internal - Internal call recordings and notes
  - calls/external - External call recordings and notes
  - emails - Email communications
  - notes - General notes

- **01_Customers/{customer}/** - Customer-specific information

- **10_PromptTemplates/** - Ready-to-use prompt templates

- **20_Demo_Library/** - Demo materials and resources

- **30_CommunicationTemplates/** - Status report and email templates

- **99_Assets/** - Processed and synthesized outputs
  - Project_Overview - High-level project summaries
  - Communications - Prepared communications
  - POC_Documents - Proof of concept documentation

## Using Prompts

To execute a prompt, use:
```bash
now-sc prompt
```

Make sure you have set the OPENROUTER_API_KEY environment variable.
"#
    )
}

const ENV_EXAMPLE: &str = r#"# OpenRouter API Key
# Get your API key from https://openrouter.ai/
OPENROUTER_API_KEY=your_api_key_here

# GitHub Personal Access Token (optional, enables repository creation)
# GITHUB_PAT=your_token_here
"#;

const GITIGNORE: &str = "node_modules/
.env
.DS_Store
*.log
";
