use anyhow::{Context, Result};
use std::path::PathBuf;

/// OpenRouter API key, required by `now-sc prompt`
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// GitHub personal access token, gates repository creation in `now-sc init`
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_PAT";

pub const DEFAULT_PROMPTS_URL: &str =
    "https://api.github.com/repos/Now-AI-Foundry/Now-SC-Base-Prompts/contents/Prompts";
pub const DEFAULT_TEMPLATES_URL: &str =
    "https://raw.githubusercontent.com/Now-AI-Foundry/Now-SC-Base-Prompts/main/Templates";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_ORG: &str = "Now-AI-Foundry";
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-exp:free";

/// Remote endpoints the tool talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// GitHub contents listing for the prompt templates
    pub prompts_url: String,
    /// Raw base URL for communication templates
    pub templates_url: String,
    /// GitHub REST API root
    pub github_api_url: String,
    /// Organization tried first when creating repositories
    pub github_org: String,
    /// OpenRouter chat completions endpoint
    pub openrouter_url: String,
    /// Model sent with every completion request
    pub model: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            prompts_url: DEFAULT_PROMPTS_URL.to_string(),
            templates_url: DEFAULT_TEMPLATES_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_org: DEFAULT_GITHUB_ORG.to_string(),
            openrouter_url: DEFAULT_OPENROUTER_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Configuration for now-sc, read once at command start
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory commands operate in (projects are created below it)
    pub working_dir: PathBuf,
    pub openrouter_api_key: Option<String>,
    pub github_token: Option<String>,
    pub endpoints: Endpoints,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let working_dir =
            std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::from_lookup(working_dir, |key| std::env::var(key).ok()))
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(working_dir: PathBuf, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Endpoints::default();

        let endpoints = Endpoints {
            prompts_url: var("NOW_SC_PROMPTS_URL").unwrap_or(defaults.prompts_url),
            templates_url: var("NOW_SC_TEMPLATES_URL").unwrap_or(defaults.templates_url),
            github_api_url: var("NOW_SC_GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            github_org: var("NOW_SC_GITHUB_ORG").unwrap_or(defaults.github_org),
            openrouter_url: var("NOW_SC_OPENROUTER_URL").unwrap_or(defaults.openrouter_url),
            model: var("NOW_SC_MODEL").unwrap_or(defaults.model),
        };

        Self {
            working_dir,
            openrouter_api_key: var(OPENROUTER_API_KEY_VAR),
            github_token: var(GITHUB_TOKEN_VAR),
            endpoints,
        }
    }
}
