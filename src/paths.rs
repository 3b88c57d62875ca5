//! Single source of truth for the presales project layout.
//!
//! This module defines WHERE things live. It has no I/O, no validation,
//! no business logic. The directory tree itself (which folders get created)
//! lives in `project::LAYOUT`; this file names the folders the rest of the
//! tool needs to reach.
//!
//! ```text
//! <project>/
//! ├── README.md
//! ├── .env.example
//! ├── .gitignore
//! ├── 00_Inbox/
//! │   ├── calls/{internal,external}/
//! │   ├── emails/
//! │   └── notes/
//! ├── 01_Customers/<customer>/
//! ├── 10_PromptTemplates/          # *.md prompt templates
//! ├── 20_Demo_Library/
//! ├── 30_CommunicationTemplates/
//! └── 99_Assets/
//!     ├── Project_Overview/
//!     ├── Communications/
//!     └── POC_Documents/
//! ```

use std::path::{Path, PathBuf};

pub const INBOX: &str = "00_Inbox";
pub const CUSTOMERS: &str = "01_Customers";
pub const PROMPT_TEMPLATES: &str = "10_PromptTemplates";
pub const DEMO_LIBRARY: &str = "20_Demo_Library";
pub const COMMUNICATION_TEMPLATES: &str = "30_CommunicationTemplates";
pub const ASSETS: &str = "99_Assets";

/// Prompt templates: `10_PromptTemplates/`
pub fn prompt_templates_dir(root: &Path) -> PathBuf {
    root.join(PROMPT_TEMPLATES)
}

/// Communication templates: `30_CommunicationTemplates/`
pub fn communication_templates_dir(root: &Path) -> PathBuf {
    root.join(COMMUNICATION_TEMPLATES)
}

/// Per-customer folder: `01_Customers/<customer>/`
pub fn customer_dir(root: &Path, customer: &str) -> PathBuf {
    root.join(CUSTOMERS).join(customer)
}

/// Root files written by `init`
pub mod files {
    use super::*;

    /// Project overview: `README.md`
    pub fn readme(root: &Path) -> PathBuf {
        root.join("README.md")
    }

    /// Environment sample: `.env.example`
    pub fn env_example(root: &Path) -> PathBuf {
        root.join(".env.example")
    }

    /// Ignore list: `.gitignore`
    pub fn gitignore(root: &Path) -> PathBuf {
        root.join(".gitignore")
    }
}
