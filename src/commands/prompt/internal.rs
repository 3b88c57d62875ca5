//! Internal implementation for prompt command

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{ChatExchange, PromptOutcome, SaveDestination, PREVIEW_CHARS};
use crate::config::{Config, OPENROUTER_API_KEY_VAR};
use crate::http;
use crate::inference::OpenRouterClient;
use crate::interactive::{input_required, Prompter};
use crate::paths;
use crate::templates::PROMPT_SUFFIX;

const RULE: &str = "─────────────────────────────────────────";

/// Main execution logic for prompt command
pub fn execute_prompt(config: &Config, prompter: &mut dyn Prompter) -> Result<PromptOutcome> {
    let Some(api_key) = config.openrouter_api_key.as_deref() else {
        eprintln!(
            "{}",
            format!("Error: {} environment variable is not set", OPENROUTER_API_KEY_VAR).red()
        );
        eprintln!("{}", "Please set your OpenRouter API key:".yellow());
        eprintln!("  export {}=your_api_key_here", OPENROUTER_API_KEY_VAR);
        anyhow::bail!("{} not set", OPENROUTER_API_KEY_VAR);
    };

    let templates_dir = paths::prompt_templates_dir(&config.working_dir);
    if !templates_dir.is_dir() {
        eprintln!(
            "{}",
            "Error: No prompt templates directory found in current directory".red()
        );
        eprintln!(
            "{}",
            "Make sure you are in a project created with \"now-sc init\"".yellow()
        );
        anyhow::bail!("prompt templates directory not found");
    }

    let templates = list_prompt_templates(&templates_dir)?;
    if templates.is_empty() {
        eprintln!("{}", "Error: No prompt templates found".red());
        anyhow::bail!("no prompt templates found");
    }

    let labels: Vec<String> = templates.iter().map(|t| display_label(t)).collect();
    let index = prompter.select("Select a prompt template", &labels)?;
    let template_name = templates
        .get(index)
        .cloned()
        .context("prompt selection out of range")?;

    let raw = fs::read(templates_dir.join(&template_name))
        .context("failed to read prompt file")?;
    let system_content = String::from_utf8_lossy(&raw).into_owned();

    println!();
    println!("{}", "Prompt Preview:".cyan());
    println!("{}", RULE);
    println!("{}", preview(&system_content, PREVIEW_CHARS));
    println!("{}", RULE);

    let user_content = prompter.input("Enter your input for this prompt", None)?;

    let client = OpenRouterClient::new(
        http::client()?,
        &config.endpoints.openrouter_url,
        api_key,
        &config.endpoints.model,
    );

    println!("{}", "Executing prompt...".cyan());
    let response_text = client
        .complete(&system_content, &user_content)
        .context("failed to execute prompt")?;
    println!("{}", "✓ Prompt executed successfully!".green());

    println!();
    println!("{}", "Response:".cyan());
    println!("{}", RULE);
    println!("{}", response_text);
    println!("{}", RULE);

    let exchange = ChatExchange {
        template_name,
        system_content,
        user_content,
        response_text,
    };

    if !prompter.confirm("Would you like to save this output?", true)? {
        return Ok(PromptOutcome::NotSaved);
    }

    let destination = choose_destination(prompter)?;
    let today = Local::now().format("%Y-%m-%d").to_string();
    let default_name = default_filename(&exchange.template_name, &today);
    let filename = input_required(
        prompter,
        "Enter filename (without extension)",
        Some(&default_name),
        "filename is required",
    )?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let document = render_output(&filename, &exchange, client.model(), &timestamp);

    let full_path = config
        .working_dir
        .join(destination.relative_path())
        .join(format!("{}.md", filename));
    write_output(&full_path, &document)?;

    println!(
        "{}",
        format!("✓ Output saved to: {}", full_path.display()).green()
    );
    Ok(PromptOutcome::Saved(full_path))
}

fn choose_destination(prompter: &mut dyn Prompter) -> Result<SaveDestination> {
    let items: Vec<String> = SaveDestination::MENU.iter().map(|s| s.to_string()).collect();
    let index = prompter.select("Where would you like to save the output?", &items)?;

    if let Some(preset) = SaveDestination::preset(index) {
        return Ok(preset);
    }

    loop {
        let custom = prompter.input(
            "Enter the path (relative to project root)",
            Some(SaveDestination::OTHER_DEFAULT),
        )?;
        match project_relative(&custom) {
            Some(path) => return Ok(SaveDestination::Other(path)),
            None => eprintln!("✗ path must stay inside the project (no '..')"),
        }
    }
}

/// `input` as a path below the project root.
///
/// Root, drive prefix and `.` components are dropped, so `/notes` means
/// `<root>/notes`. Blank input maps to [`SaveDestination::OTHER_DEFAULT`];
/// any `..` component yields `None`.
pub fn project_relative(input: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(input.trim()).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir => return None,
        }
    }

    if relative.as_os_str().is_empty() {
        relative.push(SaveDestination::OTHER_DEFAULT);
    }
    Some(relative)
}

fn write_output(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create directory")?;
    }
    fs::write(path, document).context("failed to write file")?;
    tracing::debug!(path = %path.display(), "prompt output saved");
    Ok(())
}

/// File names of the `.md` templates in `dir`, sorted.
pub fn list_prompt_templates(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).context("failed to read prompts directory")?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.context("failed to read prompts directory")?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(PROMPT_SUFFIX) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

/// `Discovery_Call_Prep.md` → `Discovery Call Prep`
pub fn display_label(file_name: &str) -> String {
    file_name
        .strip_suffix(PROMPT_SUFFIX)
        .unwrap_or(file_name)
        .replace('_', " ")
}

/// First `max_chars` characters, with `...` when truncated.
pub fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// `Discovery_Call.md` on 2026-10-16 → `Discovery_Call_2026-10-16`
pub fn default_filename(template_name: &str, date: &str) -> String {
    let stem = template_name
        .strip_suffix(PROMPT_SUFFIX)
        .unwrap_or(template_name);
    format!("{}_{}", stem, date)
}

/// Markdown document for a saved exchange.
pub fn render_output(
    filename: &str,
    exchange: &ChatExchange,
    model: &str,
    timestamp: &str,
) -> String {
    format!(
        "# {title}

**Date:** {timestamp}
**Prompt Template:** {template}
**Model:** {model}

## User Input

{input}

## Response

{response}
",
        title = filename.replace('_', " "),
        template = exchange.template_name,
        input = exchange.user_content,
        response = exchange.response_text,
    )
}
