//! Scripted prompter for testing

use gitlab_mr::error::Result;
use gitlab_mr::prompt::{Notice, Prompter};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock `Prompter` answering from scripted queues
///
/// An exhausted `input` or `select` queue answers `None` (dismissed); an
/// exhausted `notify` queue declines the offered action.
#[derive(Default)]
pub struct MockPrompter {
    inputs: Mutex<VecDeque<Option<String>>>,
    selections: Mutex<VecDeque<Option<usize>>>,
    action_answers: Mutex<VecDeque<bool>>,
    // Call tracking
    input_prompts: Mutex<Vec<(String, Option<String>)>>,
    select_prompts: Mutex<Vec<(String, Vec<String>)>>,
    statuses: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
    opened: Mutex<Vec<String>>,
}

impl MockPrompter {
    /// Prompter that dismisses everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text answer
    pub fn answer_input(self, answer: &str) -> Self {
        self.inputs.lock().unwrap().push_back(Some(answer.to_string()));
        self
    }

    /// Queue a dismissed text prompt
    pub fn dismiss_input(self) -> Self {
        self.inputs.lock().unwrap().push_back(None);
        self
    }

    /// Queue a selection
    pub fn answer_select(self, index: usize) -> Self {
        self.selections.lock().unwrap().push_back(Some(index));
        self
    }

    /// Queue a dismissed selection
    pub fn dismiss_select(self) -> Self {
        self.selections.lock().unwrap().push_back(None);
        self
    }

    /// Queue the answer to the next offered action
    pub fn answer_action(self, accept: bool) -> Self {
        self.action_answers.lock().unwrap().push_back(accept);
        self
    }

    /// `(prompt, default)` of every input prompt
    pub fn input_prompts(&self) -> Vec<(String, Option<String>)> {
        self.input_prompts.lock().unwrap().clone()
    }

    /// `(prompt, items)` of every selection
    pub fn select_prompts(&self) -> Vec<(String, Vec<String>)> {
        self.select_prompts.lock().unwrap().clone()
    }

    /// Status lines in order
    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }

    /// Notices in order
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    /// URLs opened in the browser
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Prompter for MockPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        self.input_prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), default.map(ToString::to_string)));
        Ok(self.inputs.lock().unwrap().pop_front().flatten())
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        self.select_prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), items.to_vec()));
        Ok(self.selections.lock().unwrap().pop_front().flatten())
    }

    fn status(&self, message: &str) {
        self.statuses.lock().unwrap().push(message.to_string());
    }

    fn notify(&self, notice: &Notice) -> Result<bool> {
        self.notices.lock().unwrap().push(notice.clone());
        if notice.action.is_none() {
            return Ok(false);
        }
        Ok(self.action_answers.lock().unwrap().pop_front().unwrap_or(false))
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
