//! Interactive terminal prompter

use crate::cli::style::{Stylize, check, cross, hyperlink, spinner_style};
use anstream::{eprintln, println};
use dialoguer::{Confirm, Input, Select};
use gitlab_mr::error::{Error, Result};
use gitlab_mr::prompt::{Notice, NoticeLevel, Prompter};
use indicatif::ProgressBar;
use std::cell::RefCell;
use std::time::Duration;

/// [`Prompter`] backed by dialoguer prompts and indicatif spinners
pub struct TerminalPrompter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl TerminalPrompter {
    /// Prompter writing to the current terminal
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    /// Mark the running status line, if any, as done
    pub fn finish(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            let message = spinner.message();
            spinner.finish_with_message(format!("{} {message}", check()));
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalPrompter {
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.get_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

fn terminal_error(e: dialoguer::Error) -> Error {
    Error::Internal(format!("Failed to read input: {e}"))
}

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        self.finish();
        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.with_initial_text(default);
        }
        let answer = input.interact_text().map_err(terminal_error)?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        self.finish();
        if items.is_empty() {
            return Ok(None);
        }
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(terminal_error)
    }

    fn status(&self, message: &str) {
        self.finish();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn notify(&self, notice: &Notice) -> Result<bool> {
        self.finish();
        match notice.level {
            NoticeLevel::Info => println!("{} {}", check(), notice.message),
            NoticeLevel::Error => eprintln!("{} {}", cross(), notice.message.failure()),
        }

        let Some(action) = &notice.action else {
            return Ok(false);
        };
        let accepted = Confirm::new()
            .with_prompt(format!("{action}?"))
            .default(notice.level == NoticeLevel::Info)
            .interact_opt()
            .map_err(terminal_error)?;
        Ok(accepted == Some(true))
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.finish();
        println!("{} {}", "Opening".muted(), hyperlink(url, url));
        open::that(url).map_err(|e| Error::Internal(format!("Failed to open browser: {e}")))
    }
}
