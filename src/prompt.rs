//! Terminal implementation of the wizard's prompt contract.

use std::io;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use rcurl_config::Prompter;

use crate::output;

#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, label: &str, default: Option<&str>) -> io::Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(io::Error::other)
    }

    fn confirm(&mut self, label: &str, default: bool) -> io::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(default)
            .interact()
            .map_err(io::Error::other)
    }

    fn reject(&mut self, message: &str) {
        output::warn(message);
    }
}
