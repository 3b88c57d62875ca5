//! Interactive terminal input.
//!
//! Commands never talk to the terminal directly; they go through a
//! [`Prompter`], so flows can be driven by scripted answers in tests.

use anyhow::{bail, Context, Result};
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

/// Source of user answers.
pub trait Prompter {
    /// Free-text input. An empty answer yields `default` when one is given.
    fn input(&mut self, label: &str, default: Option<&str>) -> Result<String>;

    /// Yes/no question.
    fn confirm(&mut self, label: &str, default: bool) -> Result<bool>;

    /// Pick one of `items`, returning its index.
    fn select(&mut self, label: &str, items: &[String]) -> Result<usize>;
}

/// Ask until the (trimmed) answer is non-empty.
pub fn input_required(
    prompter: &mut dyn Prompter,
    label: &str,
    default: Option<&str>,
    required_message: &str,
) -> Result<String> {
    loop {
        let answer = prompter.input(label, default)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        eprintln!("✗ {}", required_message);
    }
}

/// Prompter backed by the real terminal.
pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
        }
    }

    fn ensure_attended(&self, label: &str) -> Result<()> {
        if !self.term.is_term() {
            bail!(
                "Interactive input required for \"{}\" but no terminal is attached",
                label
            );
        }
        Ok(())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        self.ensure_attended(label)?;

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }

        input
            .interact_text_on(&self.term)
            .with_context(|| format!("prompt failed: {}", label))
    }

    fn confirm(&mut self, label: &str, default: bool) -> Result<bool> {
        self.ensure_attended(label)?;

        Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(default)
            .interact_on(&self.term)
            .with_context(|| format!("prompt failed: {}", label))
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize> {
        self.ensure_attended(label)?;

        Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(items)
            .default(0)
            .interact_on(&self.term)
            .with_context(|| format!("selection failed: {}", label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Answers(VecDeque<String>);

    impl Prompter for Answers {
        fn input(&mut self, _label: &str, default: Option<&str>) -> Result<String> {
            let answer = self.0.pop_front().unwrap_or_default();
            Ok(match default {
                Some(d) if answer.is_empty() => d.to_string(),
                _ => answer,
            })
        }

        fn confirm(&mut self, _label: &str, default: bool) -> Result<bool> {
            Ok(default)
        }

        fn select(&mut self, _label: &str, _items: &[String]) -> Result<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_input_required_reprompts_until_non_empty() {
        let mut p = Answers(VecDeque::from(vec![
            "".to_string(),
            "   ".to_string(),
            " Acme Corp ".to_string(),
        ]));
        let answer =
            input_required(&mut p, "Customer name", None, "customer name is required").unwrap();
        assert_eq!(answer, "Acme Corp");
        assert!(p.0.is_empty());
    }

    #[test]
    fn test_input_required_uses_default() {
        let mut p = Answers(VecDeque::from(vec!["".to_string()]));
        let answer =
            input_required(&mut p, "Filename", Some("Discovery_2026-10-16"), "filename is required")
                .unwrap();
        assert_eq!(answer, "Discovery_2026-10-16");
    }
}
