pub mod commands;
pub mod config;
pub mod forge;
pub mod git;
pub mod http;
pub mod inference;
pub mod interactive;
pub mod paths;
pub mod project;
pub mod templates;

// Re-export commonly used types
pub use config::Config;
pub use interactive::{Prompter, TerminalPrompter};
pub use project::ProjectDescriptor;
